use clap::Parser;
use std::process::ExitCode;

use cors_preview::cli::ServeArgs;
use cors_preview::config::ServeConfig;
use cors_preview::error::ServeError;
use cors_preview::logger;
use cors_preview::server::Server;

fn main() -> ExitCode {
    let args = ServeArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ServeConfig::load(args).map_err(ServeError::from)?;
    logger::init(&cfg).map_err(ServeError::Log)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::bind(&cfg)?;
    logger::log_server_start(&server.local_addr()?, server.root());

    // Runs until the process is killed
    server.serve_forever().await;
    Ok(())
}
