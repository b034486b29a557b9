use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use offset_engine::calendar::parse_rfc3339;
use offset_engine::{
    echo_call, instance_call, map_partition, parse_call, resolve_call, ActionContext,
    DatasetConfig, EvalContext,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "offset-engine",
    about = "Resolve relative-time references to dataset instance offsets",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the first-pass placeholder for a call, e.g. 'today(6, 0)'
    Echo {
        /// Function call to render
        call: String,

        /// Register a data-input name (repeatable)
        #[arg(long = "data-in", value_name = "NAME")]
        data_in: Vec<String>,
    },

    /// Resolve a call to the value of the instance it names
    Resolve {
        /// Function call or first-pass placeholder to resolve
        call: String,

        #[command(flatten)]
        action: ActionArgs,

        /// Bind a data-input to its resolved locations (repeatable)
        #[arg(long, value_name = "NAME=URIS")]
        bind: Vec<String>,

        /// Mark a bound data-input as still holding unresolved instances
        #[arg(long, value_name = "NAME")]
        unresolved: Vec<String>,
    },

    /// Resolve a call to its coord:current(n) expression
    Offset {
        /// Function call or first-pass placeholder to resolve
        call: String,

        #[command(flatten)]
        action: ActionArgs,
    },

    /// Append a partition to every location of a comma-separated list
    Partition {
        /// Comma-separated locations
        #[arg(long)]
        uris: String,

        /// Partition segment to append
        #[arg(long)]
        partition: String,
    },
}

/// The action being evaluated and the dataset it reads.
#[derive(Args)]
struct ActionArgs {
    /// Dataset definition file (JSON)
    #[arg(
        long,
        env = "OFFSET_ENGINE_DATASET",
        conflicts_with_all = ["initial", "frequency", "timezone"]
    )]
    dataset: Option<PathBuf>,

    /// Initial instance of the dataset (RFC 3339)
    #[arg(long)]
    initial: Option<String>,

    /// Dataset frequency: 15min, 1h, 1d, 1mon
    #[arg(long)]
    frequency: Option<String>,

    /// Dataset timezone (IANA name) for --initial/--frequency [default: UTC]
    #[arg(long)]
    timezone: Option<String>,

    /// Nominal time of the action (RFC 3339); omit when it is not yet defined
    #[arg(long)]
    nominal: Option<String>,
}

impl ActionArgs {
    fn build(&self) -> Result<ActionContext> {
        let config = match &self.dataset {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading dataset definition {}", path.display()))?;
                DatasetConfig::from_json(&json)?
            }
            None => {
                let (Some(initial), Some(frequency)) = (&self.initial, &self.frequency) else {
                    bail!("a dataset is required: pass --dataset, or --initial and --frequency");
                };
                DatasetConfig {
                    initial_instance: initial.clone(),
                    frequency: frequency.parse()?,
                    timezone: self.timezone.clone().unwrap_or_else(|| "UTC".to_string()),
                }
            }
        };

        let dataset = config.build()?;
        let nominal = self.nominal.as_deref().map(parse_rfc3339).transpose()?;
        tracing::debug!(?dataset, ?nominal, "action context");
        Ok(ActionContext::new(dataset, nominal))
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Echo { call, data_in } => {
            let mut ctx = EvalContext::new();
            for name in &data_in {
                ctx.register_data_in(name);
            }
            let out = echo_call(&mut ctx, &parse_call(&call)?)?;
            tracing::info!(wrap = ctx.wrap_required(), "rendered placeholder");
            Ok(out)
        }
        Commands::Resolve {
            call,
            action,
            bind,
            unresolved,
        } => {
            let coord = action.build()?;
            let mut ctx = EvalContext::new();
            for binding in &bind {
                let (name, uris) = binding
                    .split_once('=')
                    .with_context(|| format!("--bind expects NAME=URIS, got '{binding}'"))?;
                ctx.bind_data_in(name, uris, unresolved.iter().any(|u| u == name));
            }
            Ok(resolve_call(&ctx, &coord, &parse_call(&call)?)?)
        }
        Commands::Offset { call, action } => {
            let coord = action.build()?;
            Ok(instance_call(&coord, &parse_call(&call)?)?)
        }
        Commands::Partition { uris, partition } => Ok(map_partition(&uris, &partition)),
    }
}
