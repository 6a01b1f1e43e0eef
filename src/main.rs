use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paystate::application::service::PaymentService;
use paystate::config::StorageConfig;
use paystate::interfaces::csv::command_reader::CommandReader;
use paystate::interfaces::csv::payment_writer::PaymentWriter;
use paystate::logging::init_logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// Path to a JSON payment store (optional). Read and rewritten on every change.
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let storage = StorageConfig::resolve(cli.store_path, cli.db_path);
    let service = PaymentService::new(storage.open().into_diagnostic()?);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for cmd_result in reader.commands() {
        match cmd_result {
            Ok(cmd) => {
                if let Err(e) = service.process_command(cmd).await {
                    tracing::error!(error = %e, "Error processing command");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error reading command");
            }
        }
    }

    let payments = service.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(payments).into_diagnostic()?;

    Ok(())
}
