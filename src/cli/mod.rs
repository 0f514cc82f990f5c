//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::ResolveError;

/// Exit status for any failed command
const FAILURE_EXIT_CODE: i32 = 1;

/// Error code of the first resolution error in the chain, if any
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ResolveError>())
        .map(ResolveError::code)
}

/// Reports `err` and exits with a failure status
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let code = error_code(&err);
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "code": code,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        match code {
            Some(code) => eprintln!("Error [{code}]: {err:#}"),
            None => eprintln!("Error: {err:#}"),
        }
    }
    std::process::exit(FAILURE_EXIT_CODE)
}
