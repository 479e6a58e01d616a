//! DCNet - DC Network Analyzer
//!
//! Analyzes a resistor / voltage source / switch network and prints node
//! voltages, branch currents, power and thermal warnings.
//!
//! # Usage
//!
//! ```bash
//! dcnet divider.dcn
//! dcnet circuit.json --ground 0 --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use dcnet_core::{
    circuit::NodeId,
    error::Result,
    load_circuit, report,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// DC network analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit file (.dcn netlist or .json document)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Reference node, overriding the file's ground
    #[arg(short, long, value_name = "NODE")]
    ground: Option<String>,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Also print a plain-language description of the circuit
    #[arg(short, long)]
    describe: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // Load the circuit
    let mut circuit = load_circuit(&args.circuit_file)?;
    if let Some(ground) = &args.ground {
        circuit.ground = NodeId::new(ground.as_str());
    }
    info!(
        file = %args.circuit_file.display(),
        components = circuit.components.len(),
        ground = %circuit.ground,
        "loaded circuit"
    );

    let result = circuit.analyze_checked()?;
    debug!(nodes = result.node_voltages.len(), "analysis complete");

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        if args.describe {
            println!("{}\n", report::describe_circuit(&circuit));
        }
        println!("{}", report::render_text(&circuit, &result));
    }

    Ok(())
}
