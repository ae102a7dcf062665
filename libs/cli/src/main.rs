use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use exmark_converter::{convert_to_element, convert_to_markup, ConvertConfig};
use exmark_parser::{format_errors, parse};

/// Convert an authored block/table markup document into its
/// custom-element form
#[derive(Parser, Debug)]
#[command(name = "exmark", version)]
struct Args {
    /// Input markup file
    input: PathBuf,

    /// Print the converted element tree as JSON instead of markup
    #[arg(long)]
    json: bool,

    /// Extra vanilla tag for the allow-list; repeatable
    #[arg(long = "allow", value_name = "TAG")]
    allow: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let filename = args.input.display().to_string();
    let doc = match parse(&source) {
        Ok(doc) => doc,
        Err(errors) => {
            eprintln!("{}", format_errors(&source, &filename, &errors));
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut config = ConvertConfig::default();
    for tag in &args.allow {
        config.allow(tag);
    }

    if args.json {
        let result = convert_to_element(&doc, &config);
        println!("{}", serde_json::to_string_pretty(result.node())?);
    } else {
        println!("{}", convert_to_markup(&doc, &config));
    }

    Ok(ExitCode::SUCCESS)
}
