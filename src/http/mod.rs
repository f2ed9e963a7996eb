//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality (response builders,
//! content types, dates, name encoding), decoupled from the file store.

pub mod date;
pub mod encoding;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_204_response, build_404_response, build_405_response, build_download_response,
    build_html_response, build_json_response, build_metadata_response, build_text_response,
    ResponseBody,
};
