//! Command implementations for the BAPLIE processor CLI
//!
//! Each command is implemented in its own module.

pub mod bays;
pub mod parse;
pub mod shared;
pub mod validate;

pub use shared::CommandSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};
use crate::Error;
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `parse`: parse documents and print summaries or JSON
/// - `bays`: bay-by-bay plan of one document
/// - `validate`: parse a directory of documents and report failures
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<CommandSummary> {
    match args.command {
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args, cancellation_token).await,
        Some(Commands::Bays(bays_args)) => bays::run_bays(bays_args, cancellation_token).await,
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(validate_args, cancellation_token).await
        }
        None => Err(Error::configuration("No command given".to_string())),
    }
}
