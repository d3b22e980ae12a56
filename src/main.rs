use baplie_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(baplie_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(summary) if summary.is_success() => process::exit(0),
        Ok(_) => {
            // Failures have already been reported by the command
            process::exit(2);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BAPLIE Processor - EDIFACT Stowage Plan Parser");
    println!("==============================================");
    println!();
    println!("Parse BAPLIE 2.2.1 stowage plan messages into a bay-by-bay model of");
    println!("the vessel with every container's position, weights and ports.");
    println!();
    println!("USAGE:");
    println!("    baplie-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse documents and print a summary or JSON");
    println!("    bays        Print the bay-by-bay stowage plan of a document");
    println!("    validate    Parse every document in a directory and report failures");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize a stowage plan:");
    println!("    baplie-processor parse plan.edi");
    println!();
    println!("    # Export several plans as JSON:");
    println!("    baplie-processor parse a.edi b.edi --format json --output voyages.json");
    println!();
    println!("    # Show a single bay:");
    println!("    baplie-processor bays plan.edi --bay 12");
    println!();
    println!("    # Check an archive of plans:");
    println!("    baplie-processor validate ./archive --pattern \"*.edi\" --detailed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    baplie-processor <COMMAND> --help");
}
