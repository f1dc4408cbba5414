//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file
//! resolution: response builders, MIME guessing, conditional request
//! helpers and the CORS middleware.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::Cors;
pub use response::{
    build_error_response, build_file_response, build_html_response, build_not_modified_response,
    build_redirect_response,
};
