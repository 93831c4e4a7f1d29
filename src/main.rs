use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vendsim::application::engine::TransactionEngine;
use vendsim::config::MachineConfig;
use vendsim::domain::ports::StateObserverBox;
use vendsim::infrastructure::observers::LoggingObserver;
use vendsim::interfaces::console::ConsoleDisplay;
use vendsim::interfaces::csv::command_reader::CommandReader;
use vendsim::interfaces::csv::snapshot_writer::SnapshotWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script CSV file (action,item)
    input: PathBuf,

    /// JSON machine config. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    quarters: Option<u32>,

    #[arg(long)]
    dimes: Option<u32>,

    #[arg(long)]
    nickels: Option<u32>,

    #[arg(long)]
    cola_stock: Option<u32>,

    #[arg(long)]
    pepsi_stock: Option<u32>,

    /// Cola price in cents
    #[arg(long)]
    cola_price: Option<u32>,

    /// Pepsi price in cents
    #[arg(long)]
    pepsi_price: Option<u32>,

    /// Redraw the display on stderr after every command
    #[arg(long)]
    render: bool,

    /// Include the full state report when rendering
    #[arg(long, requires = "render")]
    verbose: bool,
}

impl Cli {
    fn machine_config(&self) -> Result<MachineConfig> {
        let mut config = match &self.config {
            Some(path) => MachineConfig::from_path(path).into_diagnostic()?,
            None => MachineConfig::default(),
        };

        let overrides = [
            (self.quarters, &mut config.quarters),
            (self.dimes, &mut config.dimes),
            (self.nickels, &mut config.nickels),
            (self.cola_stock, &mut config.cola_stock),
            (self.pepsi_stock, &mut config.pepsi_stock),
            (self.cola_price, &mut config.cola_price),
            (self.pepsi_price, &mut config.pepsi_price),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        config.validate().into_diagnostic()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.machine_config()?;

    let observer: StateObserverBox = if cli.render {
        Box::new(ConsoleDisplay::new(io::stderr()).verbose(cli.verbose))
    } else {
        Box::new(LoggingObserver)
    };
    let mut engine = TransactionEngine::new(config, observer).into_diagnostic()?;

    // Replay the script
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        match command {
            Ok(command) => {
                if let Err(e) = engine.execute(command) {
                    warn!(?command, error = %e, "Command rejected");
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading command");
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = SnapshotWriter::new(stdout.lock());
    writer.write_snapshot(&engine.snapshot()).into_diagnostic()?;

    Ok(())
}
