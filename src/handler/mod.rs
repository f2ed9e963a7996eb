//! Request handler module
//!
//! Responsible for request routing dispatch and the file-store operations
//! behind `/api/file`, plus the index page for root-like paths.

pub mod files;
pub mod index;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
