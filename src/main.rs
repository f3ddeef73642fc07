use clap::Parser;
use idguard::application::boundary::{Boundary, BoundaryConfig};
use idguard::application::service::IdService;
use idguard::domain::ports::{ComputationBox, SinkBox};
use idguard::domain::request::Request;
use idguard::infrastructure::fault::FaultInjector;
#[cfg(feature = "sink-rocksdb")]
use idguard::infrastructure::rocksdb::RocksDbSink;
use idguard::infrastructure::tracing_sink::TracingSink;
use idguard::interfaces::csv::RequestReader;
use idguard::interfaces::json::ResponseWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file with an `id` column
    input: Option<PathBuf>,

    /// Request id to handle, may be repeated. Handled before the CSV rows.
    #[arg(long = "id", allow_hyphen_values = true)]
    ids: Vec<String>,

    /// Make the computation raise an internal fault for this id, may be repeated.
    #[arg(long = "fault-id")]
    fault_ids: Vec<String>,

    /// Also send invalid-input failures to the observability sink.
    #[arg(long)]
    record_client_errors: bool,

    /// Path to persistent failure journal (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG (e.g. "debug", "idguard=trace").
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn build_sink(db_path: Option<PathBuf>) -> Result<SinkBox> {
    match db_path {
        #[cfg(feature = "sink-rocksdb")]
        Some(path) => {
            let sink = RocksDbSink::open(path).into_diagnostic()?;
            Ok(Box::new(sink))
        }
        #[cfg(not(feature = "sink-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'sink-rocksdb' feature is not enabled. Falling back to tracing sink."
            );
            Ok(Box::new(TracingSink::new()))
        }
        None => Ok(Box::new(TracingSink::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if cli.input.is_none() && cli.ids.is_empty() {
        miette::bail!("no requests given: pass a CSV file or at least one --id");
    }

    let sink = build_sink(cli.db_path)?;

    let mut computation: ComputationBox = Box::new(IdService::new());
    if !cli.fault_ids.is_empty() {
        computation = Box::new(FaultInjector::new(computation, cli.fault_ids));
    }

    let config = BoundaryConfig {
        record_client_errors: cli.record_client_errors,
    };
    let boundary = Boundary::with_config(computation, sink, config);

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for id in cli.ids {
        let exchange = boundary.handle(Request::new(id)).await;
        writer.write_exchange(&exchange).into_diagnostic()?;
    }

    if let Some(input) = cli.input {
        let file = File::open(input).into_diagnostic()?;
        let reader = RequestReader::new(file);
        for row in reader.requests() {
            match row {
                Ok(raw) => {
                    let exchange = boundary.handle(raw.into()).await;
                    writer.write_exchange(&exchange).into_diagnostic()?;
                }
                Err(e) => {
                    eprintln!("Error reading request: {}", e);
                }
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
