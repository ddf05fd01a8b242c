// aqueduct network runner

mod input;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use aqueduct_host::{HostConfig, LocalHost};
use aqueduct_net::codec::decode_utf8;
use aqueduct_net::network::render_values;
use aqueduct_net::{Host, NetResult, parse_network};
use clap::Parser;
use input::{DEFAULT_MAX_SIZE, read_definition};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network definition file, `-` reads stdin (plain or gzip)
    definition: PathBuf,

    /// Host configuration (TOML): seed, garden properties, weather report
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum input size in bytes, checked before decompression
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print only the bracketed output vector
    #[arg(long)]
    raw: bool,
}

/// JSON document written to stdout. Non-finite outputs serialize as `null`.
#[derive(Serialize, Debug)]
struct InferenceOutput {
    result: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("Fatal error: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the network evaluated successfully.
fn run(args: &Args) -> Result<bool> {
    let bytes = read_definition(&args.definition, args.max_size)?;

    let mut config = match &args.config {
        Some(path) => HostConfig::load(path)
            .with_context(|| format!("loading host config {}", path.display()))?,
        None => HostConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let mut host = LocalHost::from_config(&config).context("building host")?;

    let outcome = evaluate(&bytes, &mut host);
    if let Err(e) = &outcome {
        log::warn!("evaluation failed: {e}");
    }
    let ok = outcome.is_ok();

    let mut stdout = std::io::stdout().lock();
    if args.raw {
        match &outcome {
            Ok(values) => writeln!(stdout, "{}", render_values(values))?,
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    } else {
        let output = match outcome {
            Ok(values) => InferenceOutput {
                result: Some(values),
                error: None,
            },
            Err(e) => InferenceOutput {
                result: None,
                error: Some(e.to_string()),
            },
        };
        serde_json::to_writer(&mut stdout, &output)?;
        writeln!(stdout)?;
    }
    Ok(ok)
}

fn evaluate(bytes: &[u8], host: &mut dyn Host) -> NetResult<Vec<f64>> {
    let definition = decode_utf8(bytes)?;
    let mut network = parse_network(&definition, host)?;
    let values = network.output()?;
    log::info!(
        "network computed: {} layers, {} nodes",
        network.layers().len(),
        network.arena().len()
    );
    Ok(values)
}
