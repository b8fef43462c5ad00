//! Development server for virtual modules.
//!
//! Resolves virtual identifiers to generated module source so a dev host
//! can fetch `virtual:skills-data` over HTTP. Built on `tiny_http`:
//!
//! | Route                          | Response                          |
//! |--------------------------------|-----------------------------------|
//! | `/@id/virtual:skills-data`     | module source                     |
//! | `/skills-data.js`              | module source                     |
//! | `/__folio/manifest.json`       | `{ virtual id → file name }`      |
//! | `/`                            | HTML index of modules             |
//!
//! Module responses carry the content hash as `ETag` and answer
//! `If-None-Match` with `304`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │   Main Thread   │   │  Watcher Thread  │   │  Reload Thread   │
//! │  (HTTP Server)  │   │  (File Monitor)  │   │ (WebSocket hub)  │
//! └────────┬────────┘   └────────┬─────────┘   └────────┬─────────┘
//!          │ get_or_generate     │ regenerate           │ broadcast
//!          ▼                     ▼                      ▼
//!       ContentCache ◄──── Arc shared ────►   connected clients
//! ```

use crate::{
    build::manifest_json,
    config::SiteConfig,
    content::{Category, ContentCache},
    log,
    reload::{self, ReloadHub, ReloadSink},
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fmt::Write as _,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Prefix dev hosts use for resolved module ids.
const ID_ROUTE: &str = "/@id/";

/// Marker some hosts put in front of virtual ids.
const NULL_BYTE_MARKER: &str = "__x00__";

pub const MANIFEST_ROUTE: &str = "/__folio/manifest.json";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server with optional file watching.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig, cache: Arc<ContentCache>) -> Result<()> {
    let modules = cache.generate_all();
    let records: usize = modules.iter().map(|m| m.report.records).sum();
    log!("serve"; "generated {} modules ({records} records)", modules.len());

    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve] interface `{}`", config.serve.interface))?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        let (listener, reload_addr) = reload::bind(interface, config.serve.reload_port, MAX_PORT_RETRIES)?;
        let hub = Arc::new(ReloadHub::new());
        hub.spawn(listener);
        log!("reload"; "ws://{}", reload_addr);

        let config = config.clone();
        let cache = Arc::clone(&cache);
        let sink: Arc<dyn ReloadSink> = hub;
        thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(&config, &cache, None, sink.as_ref()) {
                log!("watch"; "{err:#}");
            }
        });
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &cache) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Manifest,
    Module(Category),
    NotFound,
}

/// Resolve a raw request URL.
pub fn resolve_route(url: &str) -> Route {
    let decoded = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| url.to_owned());
    // Strip query string (e.g., ?t=123456) before resolving path
    let path = decoded.split('?').next().unwrap_or_default();

    if path == "/" || path.is_empty() {
        return Route::Index;
    }
    if path == MANIFEST_ROUTE {
        return Route::Manifest;
    }

    let module = match path.strip_prefix(ID_ROUTE) {
        Some(id) => {
            let id = id.strip_prefix(NULL_BYTE_MARKER).unwrap_or(id);
            Category::ALL.into_iter().find(|c| c.virtual_id() == id)
        }
        None => path
            .trim_start_matches('/')
            .strip_suffix(".js")
            .or_else(|| path.trim_start_matches('/').strip_suffix(".json"))
            .and_then(|name| Category::ALL.into_iter().find(|c| c.module_name() == name)),
    };

    module.map_or(Route::NotFound, Route::Module)
}

/// A response before it is handed to `tiny_http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub etag: Option<String>,
    pub body: String,
}

impl Reply {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            etag: None,
            body: body.to_owned(),
        }
    }
}

/// Build the reply for a route.
pub fn reply(route: Route, cache: &ContentCache, if_none_match: Option<&str>) -> Result<Reply> {
    Ok(match route {
        Route::Module(category) => {
            let module = cache.get_or_generate(category);
            let etag = format!("\"{}\"", module.hash);
            let fresh = if_none_match.is_some_and(|tags| etag_matches(tags, &module.hash));
            Reply {
                status: if fresh { 304 } else { 200 },
                content_type: module.format.content_type(),
                body: if fresh { String::new() } else { module.code.clone() },
                etag: Some(etag),
            }
        }
        Route::Manifest => Reply {
            status: 200,
            content_type: "application/json; charset=utf-8",
            etag: None,
            body: manifest_json(cache.pipeline().format)?,
        },
        Route::Index => Reply {
            status: 200,
            content_type: "text/html; charset=utf-8",
            etag: None,
            body: index_page(cache),
        },
        Route::NotFound => Reply::text(404, "404 Not Found"),
    })
}

/// Whether an `If-None-Match` value names `hash`.
fn etag_matches(header: &str, hash: &str) -> bool {
    header.split(',').map(str::trim).any(|tag| {
        tag == "*" || tag.trim_start_matches("W/").trim_matches('"') == hash
    })
}

fn index_page(cache: &ContentCache) -> String {
    let mut items = String::new();
    for category in Category::ALL {
        let records = cache
            .get(category)
            .map_or_else(|| "-".to_owned(), |m| m.report.records.to_string());
        let _ = writeln!(
            items,
            r#"<li><a href="{ID_ROUTE}{id}">{id}</a> <small>{records} records</small></li>"#,
            id = category.virtual_id(),
        );
    }
    format!(
        "<!doctype html><meta charset=\"utf-8\"><title>folio</title>\n<h1>folio {}</h1>\n<p>{} of {} modules generated</p>\n<ul>\n{items}</ul>\n",
        env!("CARGO_PKG_VERSION"),
        cache.len(),
        Category::ALL.len()
    )
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, cache: &ContentCache) -> Result<()> {
    let route = resolve_route(request.url());
    let if_none_match = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("If-None-Match"))
        .map(|h| h.value.as_str().to_owned());

    let reply = reply(route, cache, if_none_match.as_deref())?;
    send(request, reply)
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field, value).map_err(|()| anyhow!("invalid header {field}: {value}"))
}

fn send(request: Request, reply: Reply) -> Result<()> {
    let mut headers = vec![
        header("Content-Type", reply.content_type)?,
        header("Access-Control-Allow-Origin", "*")?,
        header("Cache-Control", "no-cache")?,
    ];
    if let Some(etag) = &reply.etag {
        headers.push(header("ETag", etag)?);
    }

    let len = reply.body.len();
    let response = Response::new(
        StatusCode(reply.status),
        headers,
        Cursor::new(reply.body.into_bytes()),
        Some(len),
        None,
    );
    request.respond(response)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Pipeline;
    use std::{
        fs,
        io::{Read, Write},
        net::TcpStream,
    };
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ContentCache) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skills/dev.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "---\ncategory: dev\nskills: [Go]\n---\n").unwrap();
        let cache = ContentCache::new(Pipeline::new(dir.path()));
        (dir, cache)
    }

    #[test]
    fn test_resolve_route() {
        assert_eq!(resolve_route("/"), Route::Index);
        assert_eq!(resolve_route(MANIFEST_ROUTE), Route::Manifest);
        assert_eq!(resolve_route("/@id/virtual:skills-data"), Route::Module(Category::Skills));
        assert_eq!(
            resolve_route("/@id/__x00__virtual:learning-journey?t=1"),
            Route::Module(Category::LearningJourney)
        );
        assert_eq!(resolve_route("/@id/virtual%3Ablogs-data"), Route::Module(Category::Blogs));
        assert_eq!(resolve_route("/home-data.js"), Route::Module(Category::Home));
        assert_eq!(resolve_route("/contact-data.json"), Route::Module(Category::Contact));
        assert_eq!(resolve_route("/@id/skills"), Route::NotFound);
        assert_eq!(resolve_route("/skills.js"), Route::NotFound);
        assert_eq!(resolve_route("/favicon.ico"), Route::NotFound);
    }

    #[test]
    fn test_module_reply_and_etag() {
        let (_dir, cache) = fixture();
        let first = reply(Route::Module(Category::Skills), &cache, None).unwrap();
        assert_eq!(first.status, 200);
        assert!(first.body.contains("export const skillsData"));
        assert!(first.content_type.starts_with("application/javascript"));

        let etag = first.etag.unwrap();
        let cached = reply(Route::Module(Category::Skills), &cache, Some(&etag)).unwrap();
        assert_eq!(cached.status, 304);
        assert!(cached.body.is_empty());

        let stale = reply(Route::Module(Category::Skills), &cache, Some("\"other\"")).unwrap();
        assert_eq!(stale.status, 200);
    }

    #[test]
    fn test_etag_matches() {
        assert!(etag_matches("\"abc\"", "abc"));
        assert!(etag_matches("W/\"abc\", \"def\"", "abc"));
        assert!(etag_matches("*", "abc"));
        assert!(!etag_matches("\"abcd\"", "abc"));
    }

    #[test]
    fn test_manifest_and_not_found() {
        let (_dir, cache) = fixture();
        let manifest = reply(Route::Manifest, &cache, None).unwrap();
        assert!(manifest.body.contains("\"virtual:skills-data\": \"skills-data.js\""));

        let missing = reply(Route::NotFound, &cache, None).unwrap();
        assert_eq!(missing.status, 404);
    }

    #[test]
    fn test_index_lists_modules() {
        let (_dir, cache) = fixture();
        cache.get_or_generate(Category::Skills);
        let index = reply(Route::Index, &cache, None).unwrap().body;
        assert!(index.contains("/@id/virtual:skills-data"));
        assert!(index.contains("1 records"));
    }

    #[test]
    fn test_serves_over_http() {
        let (_dir, cache) = fixture();
        let (server, addr) = try_bind_port(IpAddr::from([127, 0, 0, 1]), 0, 1).unwrap();

        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            handle_request(request, &cache).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .write_all(b"GET /@id/virtual:skills-data HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        handle.join().unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.to_ascii_lowercase().contains("etag: \""));
        assert!(response.contains("\"name\": \"Go\""));
    }
}
