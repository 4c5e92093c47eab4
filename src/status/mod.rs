pub mod batch;
pub mod layout;
pub mod scan;
pub mod stage;

use crate::cli::StatusArgs;
use crate::config::CliConfig;
use crate::error::TransferError;
use crate::status::batch::{collect_batches, BatchHeader, BatchRow};
use crate::status::layout::PipelineRoots;
use crate::status::stage::{transfer_stages, vault_stages, StageLine};
use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_tz::Tz;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument};

const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Z %Y";

/// Point-in-time view of one pipeline's directories.
#[derive(Debug, Clone)]
pub struct Report {
    pub pipeline: String,
    pub generated_at: DateTime<Local>,
    pub transfer: Vec<StageLine>,
    pub vault: Vec<StageLine>,
    /// Only the rows selected for display, sorted by batch name.
    pub batches: Vec<BatchRow>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "status {} at {}",
            self.pipeline,
            render_timestamp(&self.generated_at)
        )?;
        writeln!(f)?;
        writeln!(f, "* dd-transfer-to-vault:")?;
        for line in &self.transfer {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "* dd-data-vault:")?;
        for line in &self.vault {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", BatchHeader)?;
        for row in &self.batches {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, "---")?;
        writeln!(f)
    }
}

/// Local time with the zone abbreviation (`CEST`) when the system zone is
/// known, otherwise with the numeric offset.
fn render_timestamp(at: &DateTime<Local>) -> String {
    let zone = std::env::var("TZ")
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .or_else(|| {
            iana_time_zone::get_timezone()
                .ok()
                .and_then(|name| name.parse::<Tz>().ok())
        });
    format_in_zone(at, zone)
}

fn format_in_zone(at: &DateTime<Local>, zone: Option<Tz>) -> String {
    match zone {
        Some(tz) => at.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        None => at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Resolves the pipeline selector and builds its report. Fails only on the
/// selector; unreadable directories show up as zero.
pub fn build_report(
    config: &CliConfig,
    selector: Option<&str>,
    all_batches: bool,
) -> Result<Report, TransferError> {
    let (name, pipeline) = config.pipeline(selector)?;
    let roots = PipelineRoots::resolve(&config.directories, name, pipeline);
    Ok(produce_report(name, &roots, all_batches))
}

#[instrument(skip(roots))]
pub fn produce_report(pipeline: &str, roots: &PipelineRoots, all_batches: bool) -> Report {
    let start = Instant::now();
    let generated_at = Local::now();

    let transfer = transfer_stages(roots).iter().map(|s| s.measure()).collect();
    let vault = vault_stages(roots).iter().map(|s| s.measure()).collect();

    let all = collect_batches(roots);
    let discovered = all.len();
    let batches: Vec<BatchRow> = all
        .into_iter()
        .filter(|row| row.is_visible(all_batches))
        .collect();

    info!(
        pipeline,
        discovered_batches = discovered,
        shown_batches = batches.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "status report computed"
    );

    Report {
        pipeline: pipeline.to_string(),
        generated_at,
        transfer,
        vault,
        batches,
    }
}

pub fn run_status(config: &CliConfig, selector: Option<&str>, args: StatusArgs) -> Result<()> {
    let report = build_report(config, selector, args.all_batches)?;
    print!("{}", report);
    Ok(())
}
