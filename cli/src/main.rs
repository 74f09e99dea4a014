use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use serde::Serialize;

use seedkit_core::{ConfigError, SeedConfig, SeedInitializer};

/// Seed every random state in the process and print the seed used
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed to apply (optional)
    /// if absent, one is generated from OS entropy.
    #[arg(long, short)]
    seed: Option<u64>,
    /// Allow nondeterministic tensor kernels
    #[arg(long)]
    no_deterministic: bool,
    /// JSON config file (optional)
    /// command-line flags override its values.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Print a JSON report instead of the plain message
    #[arg(long)]
    json: bool,
    /// Verbose mode (optional)
    /// if set, the program will print debug logs to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct SeedReport {
    seed: u64,
    deterministic: bool,
    hash_seed_var: Option<String>,
    hash_seed_value: Option<String>,
}

fn resolve_config(args: &Args) -> Result<SeedConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SeedConfig::from_path(path)?,
        None => SeedConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_deterministic {
        config.deterministic = false;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    debug!("resolved config: {:?}", config);

    let initializer = SeedInitializer::detect(config)?;
    let seed = initializer.initialize_configured()?;
    let config = initializer.config();

    let hash_seed_value = config
        .hash_seed_var
        .as_deref()
        .and_then(|var| std::env::var(var).ok());

    Ok(SeedReport {
        seed,
        deterministic: config.deterministic,
        hash_seed_var: config.hash_seed_var.clone(),
        hash_seed_value,
    })
}

fn render(report: &SeedReport, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(report)
    } else {
        Ok(format!("Random seed used: {}", report.seed))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .write_style(env_logger::WriteStyle::Always)
            .init();
    } else {
        env_logger::init();
    }

    let output = run(&args).and_then(|report| Ok(render(&report, args.json)?));
    match output {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
