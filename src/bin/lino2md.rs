//! Lino to Markdown Converter
//!
//! Converts a Links Notation growth report to Markdown.
//!
//! Usage:
//!   lino2md input.lino [output.md]
//!
//! If output is not specified, prints to stdout.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use quad_sort_growth::parse_lino_report;

#[derive(Debug, Parser)]
#[command(name = "lino2md", about = "Convert a Links Notation growth report to Markdown")]
struct Args {
    /// Path to the Links Notation report file
    input: PathBuf,

    /// Optional output path (prints to stdout if not specified)
    output: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let content = match fs::read_to_string(&args.input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading input file: {}", e);
            std::process::exit(1);
        }
    };

    let report = match parse_lino_report(&content) {
        Some(r) => r,
        None => {
            eprintln!("Error: Could not parse the Links Notation report");
            eprintln!("Make sure the file contains at least one growth curve");
            std::process::exit(1);
        }
    };

    let markdown = report.to_markdown_table();

    match args.output {
        Some(output_path) => match fs::write(&output_path, &markdown) {
            Ok(()) => println!("Markdown report written to: {}", output_path.display()),
            Err(e) => {
                eprintln!("Error writing output file: {}", e);
                std::process::exit(1);
            }
        },
        None => print!("{}", markdown),
    }
}
