//! Blog preview utilities
//!
//! Two independent tools share this crate:
//! - `calculator`: applies `+ - * /` to two numbers given on the command line
//! - `cors-serve`: serves a directory over HTTP and allows every origin via
//!   `Access-Control-Allow-Origin: *`

pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
