use std::env;
use std::process::exit;

use nancy::configuration::{self, Configuration};
use nancy::error::AppError;

fn main() {
    let config = match Configuration::resolve(env::args().skip(1)) {
        Ok(config) => config,
        Err(err @ AppError::Arguments(_)) => {
            eprintln!("{err}");
            eprint!("{}", configuration::usage());
            exit(2);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    if config.help {
        eprint!("{}", configuration::usage());
        exit(2);
    }

    if config.version {
        println!("nancy version {}", env!("CARGO_PKG_VERSION"));
    }
}
