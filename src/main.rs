use clap::Parser;
use genotype_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(exit_code) => {
            // Findings have already been reported by the command
            process::exit(exit_code);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(2);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Genotype Processor - DSSAT Crop Genotype File Tool");
    println!("==================================================");
    println!();
    println!("Parse, validate and rewrite DSSAT crop genotype parameter files:");
    println!("cultivar (.CUL) and ecotype (.ECO) fixed-width tables.");
    println!();
    println!("USAGE:");
    println!("    genotype-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    validate    Check parameter values against the 999991/999992 bounds rows");
    println!("    inspect     Summarize a genotype file: rows, parameters, header metadata");
    println!("    rewrite     Re-emit a file with canonical fixed-width formatting");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate a cultivar file against its bounds rows:");
    println!("    genotype-processor validate SBGRO048.CUL");
    println!();
    println!("    # Also cross-check ECO# references against the companion ecotype file:");
    println!("    genotype-processor validate SBGRO048.CUL --eco-file SBGRO048.ECO");
    println!();
    println!("    # Inspect a file, including header tooltips and calibration tags:");
    println!("    genotype-processor inspect SBGRO048.ECO --metadata");
    println!();
    println!("    # Rewrite a file with canonical column alignment:");
    println!("    genotype-processor rewrite SBGRO048.CUL --output CLEAN.CUL");
    println!();
    println!("EXIT CODES:");
    println!("    0    File is clean");
    println!("    1    Validation findings were reported");
    println!("    2    The command itself failed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    genotype-processor <COMMAND> --help");
}
