//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: classifies the request path,
//! then dispatches to the collection listing, the index page, or one of the
//! per-file operations.

use crate::config::AppState;
use crate::handler::{files, index};
use crate::http::{self, encoding, ResponseBody};
use crate::logger;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;

/// Methods accepted on a file path
const FILE_METHODS: &str = "GET, PUT, DELETE, HEAD";

/// Methods accepted on the collection path
const COLLECTION_METHODS: &str = "GET, HEAD";

/// Classified request path
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// Exactly the collection path
    Collection,
    /// Root-like path (two or fewer `/`-separated segments)
    Index,
    /// Under the collection path; carries the raw, still percent-encoded name
    File(&'a str),
    Unknown,
}

/// Classify a raw request path against the configured collection path
pub fn resolve_route<'a>(path: &'a str, collection_path: &str) -> Route<'a> {
    if path == collection_path {
        return Route::Collection;
    }

    if path.split('/').count() <= 2 {
        return Route::Index;
    }

    let prefix = collection_path.trim_end_matches('/');
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .map_or(Route::Unknown, Route::File)
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    let path = req.uri().path().to_string();
    let storage = &state.config.storage;

    let response = match resolve_route(&path, &storage.collection_path) {
        Route::Collection => match *req.method() {
            Method::GET => files::list(&state.store, false).await,
            Method::HEAD => files::list(&state.store, true).await,
            _ => {
                logger::log_warning(&format!(
                    "Method not allowed on collection: {}",
                    req.method()
                ));
                http::build_405_response(COLLECTION_METHODS)
            }
        },
        Route::Index => index::serve_index(&storage.index_file, req.method() == Method::HEAD).await,
        Route::File(raw_name) => dispatch_file(req, raw_name, &state).await,
        Route::Unknown => http::build_404_response(),
    };

    Ok(response)
}

/// Dispatch a file-path request on its method
async fn dispatch_file<B>(req: Request<B>, raw_name: &str, state: &AppState) -> Response<ResponseBody>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    let method = req.method().clone();
    if !matches!(
        method,
        Method::GET | Method::PUT | Method::DELETE | Method::HEAD
    ) {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response(FILE_METHODS);
    }

    let Some(name) = encoding::decode_name(raw_name) else {
        logger::log_warning(&format!("File name is not valid UTF-8: {raw_name}"));
        return http::build_text_response(StatusCode::BAD_REQUEST, "Invalid file name.");
    };

    let store = &state.store;
    match method {
        Method::GET => files::download(store, &name).await,
        Method::PUT => files::upload(store, &name, req.into_body()).await,
        Method::DELETE => files::delete(store, &name).await,
        _ => files::info(store, &name).await,
    }
}
