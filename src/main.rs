// Allow warnings, so we don't see so many warnings everytime we run tests or build
// We will clean up warnings once in a while
#![allow(warnings)]
mod config;
mod logging;
mod scss;
#[cfg(test)]
mod test_utils;

use std::process;
use log::{error, info};
use scss::server::start_scss_language_server;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize file logging before anything else
    if let Err(e) = logging::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("SCSS Language Server starting on stdio");

    if let Err(e) = start_scss_language_server().await {
        error!("SCSS Language Server error: {:?}", e);
        process::exit(1);
    }

    info!("SCSS Language Server shutting down");
}
