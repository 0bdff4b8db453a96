mod tracing;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use modkit_core::kernel::{Loader, Result};
use modkit_core::plugin_system::{PluginRegistry, PluginSystemError};
use modkit_core::storage::LoaderConfig;

use crate::tracing::TracingFactory;

/// Modkit: resolve, order and boot a directory of mods
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Loader configuration file (JSON, YAML or TOML)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory to scan for mods, overriding the configuration
    #[arg(long, value_name = "DIR", global = true)]
    mods_dir: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// One lifecycle step driven by `modkit boot`
type BootStep = fn(&mut PluginRegistry) -> std::result::Result<(), PluginSystemError>;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover mods and check that every dependency is satisfied
    Check,
    /// Print the load order, one mod per line
    Order,
    /// Run every mod through the lifecycle with tracing stand-ins
    Boot,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize env_logger: {}", e);
    }
}

fn loader_config(args: &CliArgs) -> Result<LoaderConfig> {
    let mut config = match &args.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(mods_dir) = &args.mods_dir {
        config.mods_dir = mods_dir.clone();
    }
    debug!("Loader configuration: {:?}", config);
    Ok(config)
}

async fn run(args: CliArgs) -> Result<()> {
    let loader = Loader::new(loader_config(&args)?);
    let descriptors = loader.discover().await?;

    match args.command {
        Commands::Check => {
            loader.plan(&descriptors)?;
            println!("ok: {} mods", descriptors.len());
        }
        Commands::Order => {
            let plan = loader.plan(&descriptors)?;
            for descriptor in plan.descriptors() {
                println!("{} {}", descriptor.id, descriptor.version);
            }
        }
        Commands::Boot => {
            let plan = loader.plan(&descriptors)?;
            let mut registry = loader.instantiate(plan, &TracingFactory, loader.config_store())?;
            println!("booting {} mods", registry.len());

            let steps: [(&str, BootStep); 5] = [
                ("preload", |r| r.run_preload()),
                ("load", |r| r.run_load()),
                ("postload", |r| r.run_postload()),
                ("update", |r| r.run_update()),
                ("unload", |r| r.run_unload()),
            ];
            for (name, step) in steps {
                println!("{}", name);
                step(&mut registry)?;
            }
            println!("done");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Fatal error: {:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
