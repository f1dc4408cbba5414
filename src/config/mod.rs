// Configuration module entry point
// Builds the server configuration from defaults and command-line overrides

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::cli::ServeArgs;

// Re-export public types
pub use state::AppState;
pub use types::{LoggingConfig, ServeConfig, ServerConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ROOT: &str = ".";

impl ServeConfig {
    /// Build configuration from built-in defaults overridden by command-line arguments
    pub fn load(args: &ServeArgs) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("logging.access_log", false)?
            .set_override_option("server.host", args.bind.map(|ip| ip.to_string()))?
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option(
                "server.root",
                args.dir
                    .as_ref()
                    .map(|dir| dir.to_string_lossy().into_owned()),
            )?
            .set_override("logging.access_log", args.access_log)?
            .set_override_option(
                "logging.access_log_file",
                args.access_log_file
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .host
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.server.port))
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.host))
    }
}
