//! File operations module
//!
//! Maps store results onto the endpoint's status-code contract.

use std::fmt::Display;

use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};

use crate::http::{self, ResponseBody};
use crate::logger;
use crate::store::{FileStore, StoreError};

/// GET or HEAD on the collection path: JSON array of stored names
pub async fn list(store: &FileStore, is_head: bool) -> Response<ResponseBody> {
    match store.list().await {
        Ok(names) => http::build_json_response(StatusCode::OK, &names, is_head),
        Err(e) => error_response(&e, "list", ""),
    }
}

/// GET on a file path: stream the file as an attachment
pub async fn download(store: &FileStore, name: &str) -> Response<ResponseBody> {
    match store.open_file(name).await {
        Ok((file, meta)) => http::build_download_response(file, name, &meta),
        Err(e) => error_response(&e, "download", name),
    }
}

/// PUT on a file path: create or replace with the request body
pub async fn upload<B>(store: &FileStore, name: &str, body: B) -> Response<ResponseBody>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    match store.write(name, body).await {
        Ok(written) => {
            logger::log_store_event(&format!("Stored '{name}' ({written} bytes)"));
            http::build_text_response(StatusCode::CREATED, "File uploaded successfully.")
        }
        Err(e) => error_response(&e, "upload", name),
    }
}

/// DELETE on a file path
pub async fn delete(store: &FileStore, name: &str) -> Response<ResponseBody> {
    match store.remove(name).await {
        Ok(()) => {
            logger::log_store_event(&format!("Deleted '{name}'"));
            http::build_204_response()
        }
        Err(StoreError::NotFound) => {
            http::build_text_response(StatusCode::NOT_FOUND, "File not found.")
        }
        Err(e) => error_response(&e, "delete", name),
    }
}

/// HEAD on a file path: size and modification time only
pub async fn info(store: &FileStore, name: &str) -> Response<ResponseBody> {
    match store.metadata(name).await {
        Ok(meta) => http::build_metadata_response(&meta),
        Err(e) => error_response(&e, "info", name),
    }
}

fn error_response(err: &StoreError, op: &str, name: &str) -> Response<ResponseBody> {
    match err {
        StoreError::NotFound => http::build_404_response(),
        StoreError::InvalidName(_) => {
            logger::log_warning(&format!("Rejected {op}: {err}"));
            http::build_text_response(StatusCode::BAD_REQUEST, "Invalid file name.")
        }
        StoreError::OutsideRoot(_) => {
            logger::log_warning(&format!("Path traversal attempt blocked: '{name}' ({err})"));
            http::build_text_response(StatusCode::BAD_REQUEST, "Invalid file name.")
        }
        StoreError::Body(_) => {
            logger::log_warning(&format!("Upload of '{name}' incomplete: {err}"));
            http::build_text_response(StatusCode::BAD_REQUEST, "Upload aborted.")
        }
        StoreError::Io(_) => {
            logger::log_error(&format!("Failed to {op} '{name}': {err}"));
            http::build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "500 Internal Server Error",
            )
        }
    }
}
