//! # `bunbo` Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Load configuration and open the cart store
//! 4. Run the command, print its output

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;

use bunbo_storefront::cli::{self, Cli};

fn main() {
    bunbo_storefront::init_tracing();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = cli::run(cli, &mut out) {
        tracing::error!(code = ?e.code, "Command failed: {}", e.message);
        eprintln!("{}", e.message);
        std::process::exit(1);
    }
}
