//! Anteroom replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a JSON-lines trace with default admission settings
//! anteroom-replay session.jsonl
//!
//! # CBOR trace, strict arrival detection, refuse non-moderator intents
//! anteroom-replay session.cbor --format cbor \
//!     --arrival-detection set-difference --enforce-moderator-gate
//! ```

use std::{
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
};

use anteroom_cli::{Replayer, TraceFormat, TracingGateway, read_trace};
use anteroom_client::{AdmissionConfig, ArrivalDetection, ParticipantId};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Anteroom session replay
#[derive(Parser, Debug)]
#[command(name = "anteroom-replay")]
#[command(about = "Replay a recorded session through the admission coordinator")]
#[command(version)]
struct Args {
    /// Trace file to replay
    trace: PathBuf,

    /// Trace encoding
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// New-arrival detection strategy
    #[arg(long, value_enum, default_value_t = Arrival::RosterGrowth)]
    arrival_detection: Arrival,

    /// Refuse accept/reject while the local participant is not a moderator
    #[arg(long)]
    enforce_moderator_gate: bool,

    /// Local id treated as unresolved
    #[arg(long, default_value = "local", conflicts_with = "no_placeholder")]
    placeholder_local_id: String,

    /// Trust the first local id the roster reports
    #[arg(long)]
    no_placeholder: bool,

    /// Treat the session as joined before the first record
    #[arg(long)]
    joined: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Cbor,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Arrival {
    RosterGrowth,
    SetDifference,
}

impl Args {
    fn config(&self) -> AdmissionConfig {
        AdmissionConfig {
            arrival_detection: match self.arrival_detection {
                Arrival::RosterGrowth => ArrivalDetection::RosterGrowth,
                Arrival::SetDifference => ArrivalDetection::SetDifference,
            },
            placeholder_local_id: (!self.no_placeholder)
                .then(|| ParticipantId::from(self.placeholder_local_id.as_str())),
            enforce_moderator_gate: self.enforce_moderator_gate,
            ..AdmissionConfig::default()
        }
    }

    fn trace_format(&self) -> TraceFormat {
        match self.format {
            Format::Json => TraceFormat::Json,
            Format::Cbor => TraceFormat::Cbor,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = args.config();
    tracing::info!(
        trace = %args.trace.display(),
        arrival_detection = config.arrival_detection.as_str(),
        enforce_moderator_gate = config.enforce_moderator_gate,
        "replaying trace"
    );

    let reader = BufReader::new(File::open(&args.trace)?);
    let records = read_trace(reader, args.trace_format())?;

    let gateway = if args.joined { TracingGateway::joined() } else { TracingGateway::new() };
    let mut replayer = Replayer::new(gateway, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = replayer.run(records, &mut out)?;
    out.flush()?;

    if summary.failures > 0 {
        tracing::warn!("{} of {} records failed", summary.failures, summary.steps);
    }

    Ok(())
}
