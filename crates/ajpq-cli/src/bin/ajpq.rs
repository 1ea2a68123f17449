//! ajpq binary entry point.

use ajpq::{AjpClient, ClientConfig};
use ajpq_cli::Args;
use clap::Parser;
use std::process;
use std::time::Duration;

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let timeout = args.timeout.map(Duration::from_secs);
    let mut client = AjpClient::new(ClientConfig {
        connect_timeout: timeout,
        io_timeout: timeout,
        verbose: args.verbose,
    });

    let mut stdout = std::io::stdout().lock();
    match ajpq_cli::run(&args, &mut client, &mut stdout) {
        Ok(status) => process::exit(i32::from(status)),
        Err(e) => {
            eprintln!("ajpq: {e}");
            process::exit(1);
        }
    }
}
