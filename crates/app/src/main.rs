//! Comanda command line client

use std::process;

use clap::Parser;
use comanda_app::{context::AppContext, observability};

use crate::commands::Cli;

mod commands;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    let mut context = match AppContext::from_config(&cli.config) {
        Ok(context) => context,
        Err(error) => {
            eprintln!("configuration error: {error}");
            process::exit(1);
        }
    };

    if let Err(error) = cli.run(&mut context).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
