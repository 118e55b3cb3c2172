//! blaestc CLI - Blaest to C bootstrap transpiler

use anyhow::Result;
use blaest::diagnostics::{from_error, Diagnostics};
use blaest::{BlaestError, TranspileOptions};
use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// Blaest to C bootstrap transpiler
#[derive(Parser, Debug)]
#[command(name = "blaestc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transpile Blaest code to C", long_about = None)]
#[command(after_help = "Output is written to <INPUT>.c (e.g. file.b -> file.b.c).\n\
Compile it in a directory that also holds the runtime file 'bglue.c'.")]
struct Cli {
    /// Input Blaest file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output C file (default: <INPUT>.c)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show debug information
    #[arg(short, long)]
    debug: bool,

    /// Dump the syntax tree and exit
    #[arg(long)]
    dump_ast: bool,

    /// Check only (don't generate output)
    #[arg(short, long)]
    check: bool,

    /// Emit JSON diagnostics to stderr (on failure only)
    #[arg(long)]
    diag_json: bool,

    /// Runtime support file named in the generated #include
    #[arg(long, value_name = "FILE", default_value = "bglue.c")]
    runtime_header: String,

    /// Declare a function provided by the runtime (repeatable)
    #[arg(long = "extern", value_name = "NAME")]
    externs: Vec<String>,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let usage = BlaestError::MalformedUsage(err.render().to_string());
            eprint!("{usage}");
            std::process::exit(2);
        }
    };

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    debug!("input: {:?}", cli.input);
    debug!("output: {:?}", cli.output);

    let options = TranspileOptions::default()
        .with_runtime_header(cli.runtime_header.clone())
        .with_runtime_functions(cli.externs.iter().cloned());

    if cli.dump_ast || cli.check {
        let source = std::fs::read_to_string(&cli.input)?;
        let program = blaest::analyze_with_diagnostics(&source, Some(&cli.input), &options)
            .unwrap_or_else(|diags| fail(&diags, cli.diag_json));
        if cli.dump_ast {
            println!("{}", serde_json::to_string_pretty(&program)?);
        } else {
            println!("Transpilation successful!");
        }
        return Ok(());
    }

    let output_path = cli
        .output
        .unwrap_or_else(|| blaest::default_output_path(&cli.input));
    blaest::transpile_file(&cli.input, &output_path, &options)
        .unwrap_or_else(|err| fail(&from_error(&err, Some(&cli.input)), cli.diag_json));
    info!("transpiled {:?} -> {:?}", cli.input, output_path);
    println!("Transpiled to: {}", output_path.display());

    Ok(())
}

/// Report the first error and halt
fn fail(diags: &Diagnostics, json: bool) -> ! {
    eprint!("{}", diags.to_text());
    if json {
        eprintln!("{}", diags.to_json());
    }
    std::process::exit(1);
}

