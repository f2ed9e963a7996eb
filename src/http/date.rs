//! HTTP date formatting (RFC 1123, always GMT)

use chrono::{DateTime, Utc};

const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format(RFC1123_FORMAT).to_string()
}
