//! Command-line harness: load a JSON file of events, ingest it and print the
//! derived charging stations.
//!
//! # Usage
//!
//! ```bash
//! chargeview --input events.json
//!
//! # Machine-readable log lines
//! chargeview --input events.json --log-format json
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use chargeview_core::ChargingStation;
use chargeview_events::StationProjection;
use chargeview_infra::event_store::{InMemoryEventLog, UncommittedEvent};
use chargeview_infra::ingest::IngestGateway;
use chargeview_infra::projections::BasicProjection;
use chargeview_observability::LogFormat;

/// Derive charging-station state from a recorded OCPP event log
#[derive(Parser, Debug)]
#[command(name = "chargeview", author, version, about, long_about = None)]
pub struct Args {
    /// JSON file holding an array of event records
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log output format (json, text)
    #[arg(long, env = "CHARGEVIEW_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Report {
    pub events_processed: usize,
    pub num_charging_stations: usize,
    pub stations: Vec<ChargingStation>,
}

/// Read and parse the input file.
pub fn load_events(path: &Path) -> anyhow::Result<Vec<UncommittedEvent>> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file {}", path.display()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("failed to read file {}", path.display()))?;

    serde_json::from_str(&contents).context("failed to unmarshal json")
}

/// Ingest every event in `input`, then log the derived station views.
///
/// Fails if any event could not be ingested; all per-event failures are carried by
/// the returned error.
pub fn run(input: &Path) -> anyhow::Result<Report> {
    let events = load_events(input)?;
    let events_processed = events.len();

    let log = Arc::new(InMemoryEventLog::new());
    let gateway = IngestGateway::new(log.clone());
    gateway
        .process_batch(events)
        .context("failed to process events")?;

    info!("processed {events_processed} events");

    let projection = BasicProjection::new(log);

    let num_charging_stations = projection
        .num_charging_stations()
        .context("failed to get number of charging stations")?;
    info!("num charging stations: {num_charging_stations}");

    let stations = projection
        .charging_stations()
        .context("failed to get charging stations")?;

    for station in &stations {
        let json = serde_json::to_string_pretty(station).context("failed to marshal station")?;
        info!("charging station: {json}");
    }

    Ok(Report {
        events_processed,
        num_charging_stations,
        stations,
    })
}
