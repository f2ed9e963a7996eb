//! HTTP response building module
//!
//! Provides builders for the status codes the file endpoint answers with,
//! decoupled from the store and routing logic.

use std::convert::Infallible;
use std::io;

use futures::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::date::format_http_date;
use super::encoding::encode_name;
use super::mime;
use crate::store::FileMeta;

/// Body type of every response: buffered for small replies, streamed for downloads
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

#[allow(clippy::needless_pass_by_value)]
const fn never(e: Infallible) -> io::Error {
    match e {}
}

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(never).boxed_unsync()
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(never).boxed_unsync()
}

/// Stream a file in `ReaderStream`-sized chunks
pub fn stream_file(file: File) -> ResponseBody {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed_unsync()
}

/// Build plain-text response with the given status
pub fn build_text_response(status: StatusCode, text: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(full(text))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(empty())
        })
}

/// Build 404 Not Found response with an empty body
pub fn build_404_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(empty())
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", allow)
        .body(full("Method not supported."))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(full("Method not supported."))
        })
}

/// Build 204 No Content response
pub fn build_204_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(empty())
        })
}

/// Build JSON response; HEAD keeps the headers and drops the body
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<ResponseBody> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "500 Internal Server Error",
            );
        }
    };
    let content_length = json.len();
    let body = if is_head { empty() } else { full(json) };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(empty())
        })
}

/// Build generic HTML response
pub fn build_html_response(content: Bytes, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let body = if is_head { empty() } else { full(content) };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(empty())
        })
}

/// Build 200 download response streaming `file` as an attachment
pub fn build_download_response(file: File, name: &str, meta: &FileMeta) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", mime::content_type_for(name))
        .header("Content-Length", meta.len)
        .header("Last-Modified", format_http_date(&meta.modified))
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", encode_name(name)),
        )
        .body(stream_file(file))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(empty())
        })
}

/// Build 200 metadata response for HEAD: headers only, no body
pub fn build_metadata_response(meta: &FileMeta) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Length", meta.len)
        .header("Last-Modified", format_http_date(&meta.modified))
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("HEAD", &e);
            Response::new(empty())
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
