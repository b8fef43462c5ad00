//! Markdown content → virtual data modules.
//!
//! # Architecture
//!
//! ```text
//! content/<category>/**/*.md
//!     │
//!     ▼
//! source ──► front_matter + sections ──► parsers::<Kind> ──► engine
//!                                                              │
//!                                      module (ESM / JSON) ◄───┘
//!                                              │
//!                                              ▼
//!                                    cache (per category)
//! ```
//!
//! Each category is regenerated whole from the files on disk; nothing is
//! carried over between passes besides the cached module.

pub mod bullets;
pub mod cache;
pub mod category;
pub mod engine;
pub mod front_matter;
pub mod module;
pub mod parsers;
pub mod sections;
pub mod source;
pub mod types;

pub use cache::ContentCache;
pub use category::Category;
pub use engine::Pipeline;
pub use module::{GeneratedModule, ModuleFormat};
pub use source::SourceOptions;
