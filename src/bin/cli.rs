// src/bin/cli.rs
use std::process::ExitCode;

use clap::Parser;
use movie_trends::cli::{self, Cli, Outcome};

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("Error: {e}");
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    movie_trends::log::init(cli.verbose);

    match cli::run(&cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::NoData) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(1)
        }
    }
}
