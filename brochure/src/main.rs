use std::path::PathBuf;

use anyhow::Context;
use brochure::commands::{serve::serve, validate::ValidateCommand};
use brochure_config::DEFAULT_CONFIG_PATH;
use brochure_utils::brochure_version;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    match cli.command {
        Command::Serve => {
            let config =
                brochure_config::load(cli.config.as_slice()).context("Failed to load config")?;
            serve(config).await?
        }
        Command::CheckConfig { verbose } => {
            let config =
                brochure_config::load(cli.config.as_slice()).context("Failed to load config")?;
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Validate(command) => command.invoke()?,
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = brochure_version())]
struct Cli {
    /// Config files to load, later files override earlier ones
    #[arg(
        short,
        long,
        env = "BROCHURE_CONFIG",
        value_delimiter = ':',
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    config: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server handling contact form submissions
    #[command(aliases(["run", "start", "s"]))]
    Serve,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check a contact form submission stored in a JSON file
    #[command(aliases(["v"]))]
    Validate(ValidateCommand),
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
