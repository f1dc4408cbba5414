//! Command-line arguments for the `calculator` and `cors-serve` binaries

use crate::calc::Operation;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Arguments of the `calculator` binary
#[derive(Parser, Debug, Clone)]
#[command(
    name = "calculator",
    version,
    about = "Perform calculations on two numbers",
    allow_negative_numbers = true
)]
pub struct CalcArgs {
    /// Which operation to perform
    #[arg(short = 'o', long = "operation", value_enum, required = true)]
    pub operation: Operation,

    /// The first number
    pub op1: f64,

    /// The second number
    pub op2: f64,
}

/// Arguments of the `cors-serve` binary
///
/// Unset options fall back to the defaults in [`crate::config`].
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "cors-serve",
    version,
    about = "Run a simple HTTP server allowing all CORS, to preview blog posts"
)]
pub struct ServeArgs {
    /// Port to listen on [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve [default: current directory]
    pub dir: Option<PathBuf>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(short, long)]
    pub bind: Option<IpAddr>,

    /// Log every request to stderr
    #[arg(long, default_value_t = false)]
    pub access_log: bool,

    /// Append access log lines to this file instead of stderr
    #[arg(long, requires = "access_log")]
    pub access_log_file: Option<PathBuf>,
}
