//! Error handling for the CLI.

use colored::Colorize;

pub use schema_registry_core::error::{Error, Result};

pub fn print_error(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    match error {
        Error::ConfigurationError(_) => {
            eprintln!("\n{}", "Hint:".yellow().bold());
            eprintln!("  Known dialect tags: avro, json-schema");
        }
        Error::IncompatibleSchema(_) => {
            eprintln!("\n{}", "Hint:".yellow().bold());
            eprintln!("  Pass --policy none to skip compatibility enforcement, or adjust the candidate");
        }
        _ => {}
    }
}
