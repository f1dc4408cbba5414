//! Request handler module
//!
//! Responsible for method validation and for resolving request paths to
//! files, index pages and directory listings under the root directory.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, RequestContext};
