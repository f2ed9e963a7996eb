//! Index page module
//!
//! Root-like requests get the configured HTML page, or a built-in page
//! when that file is absent. The file store is never touched.

use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use tokio::fs;

use crate::http::{self, ResponseBody};
use crate::logger;

/// Serve the index page
pub async fn serve_index(index_file: &str, is_head: bool) -> Response<ResponseBody> {
    let content = match fs::read(index_file).await {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                logger::log_warning(&format!("Failed to read index page '{index_file}': {e}"));
            }
            Bytes::from_static(DEFAULT_INDEX.as_bytes())
        }
    };

    http::build_html_response(content, is_head)
}

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>File Store</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            max-width: 640px;
            margin: 40px auto;
            line-height: 1.6;
        }
        code { background: #f2f2f2; padding: 2px 4px; }
    </style>
</head>
<body>
    <h1>File Store</h1>
    <p>Flat file storage over HTTP.</p>
    <ul>
        <li><code>GET /api/file</code> lists stored files</li>
        <li><code>GET /api/file/&lt;name&gt;</code> downloads a file</li>
        <li><code>PUT /api/file/&lt;name&gt;</code> uploads or replaces a file</li>
        <li><code>DELETE /api/file/&lt;name&gt;</code> removes a file</li>
        <li><code>HEAD /api/file/&lt;name&gt;</code> returns size and modification time</li>
    </ul>
</body>
</html>"#;
