use clap::{Parser, Subcommand};
use std::path::PathBuf;

use slipway_plugin::credentials::FigmentCredentialStore;
use slipway_plugin::resolver::ConfigResolver;
use slipway_plugin::{config, steps};

use slipway_appservice::DeploymentSlot;

#[derive(Parser)]
#[command(name = "slipway")]
#[command(about = "Deploy Java web applications to an app-hosting platform")]
#[command(version)]
struct Cli {
    /// Path to the project descriptor (defaults to ./slipway.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and deploy the configured artifacts
    Deploy,

    /// Start the deployment slot
    Start,

    /// Stop the deployment slot
    Stop,

    /// Restart the deployment slot
    Restart,

    /// Delete the deployment slot
    Delete,

    /// Show the current state of the deployment slot
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let figment = config::figment(cli.config.as_deref());
    let settings = config::deploy_settings(&figment)?;
    let credentials = FigmentCredentialStore::new(figment.clone());
    let resolver = ConfigResolver::new(&settings, &credentials);

    let client = slipway_appservice::config::client(&figment)?;
    let slot = DeploymentSlot::new(client, resolver.app_name()?, resolver.slot_name()?);

    match cli.command {
        Commands::Deploy => {
            let descriptor = resolver.resolve()?;
            steps::deploy(&slot, &descriptor)
        }
        Commands::Start => slot.start(),
        Commands::Stop => slot.stop(),
        Commands::Restart => slot.restart(),
        Commands::Delete => slot.delete(),
        Commands::Status => {
            if !slot.exists()? {
                println!("Slot {} does not exist", slot.name());
                return Ok(());
            }
            let entity = slot.entity()?;
            match entity.host {
                Some(host) => println!("{} ({}) - {}", entity.name, host, entity.state),
                None => println!("{} - {}", entity.name, entity.state),
            }
            Ok(())
        }
    }
}
