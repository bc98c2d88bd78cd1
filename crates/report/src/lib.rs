//! `humidor-report`: command-line front end over the humidor engine.
//!
//! Reads inventory snapshots and draft/candidate records from JSON files and
//! prints the engine's results as JSON. Storage and rendering stay outside.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value as JsonValue, json};

use humidor_ai::{AiError, AutoFill, AutoFillOutcome, DraftRecord, FieldLookup, FieldSchema};
use humidor_core::EngineConfig;
use humidor_inventory::{BrowseViews, Dimension, InventoryItem, MapViewport, analytics};

#[derive(Parser, Debug)]
#[command(author, version, about = "humidor: inventory analytics and guided auto-fill")]
pub struct Cli {
    /// Log format (`json` or `pretty`); falls back to `HUMIDOR_LOG_FORMAT`.
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the wrapper/strength/country views and totals.
    Browse(SnapshotArgs),
    /// List the items under one bucket.
    Filter(FilterArgs),
    /// Print the initial map viewport for a snapshot.
    Viewport(SnapshotArgs),
    /// Merge a candidate record (lookup response) into a draft.
    Autofill(AutofillArgs),
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// JSON array of inventory items.
    pub snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    pub snapshot: PathBuf,
    #[arg(long, value_parser = parse_dimension)]
    pub dimension: Dimension,
    /// Bucket filter value, e.g. `Cuba`, `Other`, `Maduro`.
    #[arg(long)]
    pub value: String,
}

#[derive(Args, Debug)]
pub struct AutofillArgs {
    /// Draft record (JSON object).
    #[arg(long)]
    pub draft: PathBuf,
    /// Raw lookup response to validate and merge.
    #[arg(long)]
    pub candidate: PathBuf,
    /// Name to look up; defaults to the draft's `name` field.
    #[arg(long)]
    pub name: Option<String>,
}

fn parse_dimension(value: &str) -> Result<Dimension, String> {
    match value.to_ascii_lowercase().as_str() {
        "wrapper" => Ok(Dimension::Wrapper),
        "strength" => Ok(Dimension::Strength),
        "country" => Ok(Dimension::Country),
        other => Err(format!("unknown dimension `{other}` (expected wrapper, strength or country)")),
    }
}

pub fn load_snapshot(path: &Path) -> Result<Vec<InventoryItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let records: Vec<JsonValue> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    let total = records.len();
    let items: Vec<InventoryItem> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if !record.is_object() {
                tracing::warn!(index, "skipping snapshot entry that is not an object");
                return None;
            }
            serde_json::from_value(record)
                .map_err(|error| tracing::warn!(index, %error, "skipping unreadable snapshot entry"))
                .ok()
        })
        .collect();
    tracing::info!(
        path = %path.display(),
        items = items.len(),
        skipped = total - items.len(),
        "loaded inventory snapshot"
    );
    Ok(items)
}

pub fn load_draft(path: &Path) -> Result<DraftRecord> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid draft {}", path.display()))
}

/// Lookup backed by a response captured on disk.
struct FileLookup {
    path: PathBuf,
}

impl FieldLookup for FileLookup {
    fn lookup(&self, _name: &str, _schema: &FieldSchema) -> Result<String, AiError> {
        fs::read_to_string(&self.path)
            .map_err(|e| AiError::LookupFailed(format!("{}: {e}", self.path.display())))
    }
}

pub fn browse_report(items: &[InventoryItem]) -> Result<JsonValue> {
    Ok(serde_json::to_value(BrowseViews::compute(items))?)
}

pub fn filter_report(items: &[InventoryItem], dimension: Dimension, value: &str) -> Result<JsonValue> {
    let matches = analytics::filter_by_bucket(items, dimension, value);
    Ok(json!({
        "dimension": dimension,
        "value": value,
        "count": matches.len(),
        "items": serde_json::to_value(matches)?,
    }))
}

pub fn viewport_report(items: &[InventoryItem], config: EngineConfig) -> Result<JsonValue> {
    let viewport = MapViewport::for_inventory(items, config);
    Ok(json!({
        "center": serde_json::to_value(viewport.center())?,
        "zoom": viewport.zoom(),
        "minZoom": config.min_zoom,
        "maxZoom": config.max_zoom,
    }))
}

pub fn autofill_report(draft: &DraftRecord, name: &str, lookup: &dyn FieldLookup) -> Result<JsonValue> {
    let autofill = AutoFill::cigar();
    let report = match autofill.run(name, name, draft, lookup) {
        AutoFillOutcome::Filled(outcome) => json!({
            "status": "filled",
            "message": outcome.summary(),
            "changedFields": outcome.changed_fields,
            "draft": serde_json::to_value(&outcome.updated_draft)?,
        }),
        AutoFillOutcome::NothingNew => json!({
            "status": "nothing_new",
            "message": "Nothing new to fill in.",
            "draft": serde_json::to_value(draft)?,
        }),
        AutoFillOutcome::NotFound(error) => json!({
            "status": "not_found",
            "message": format!("No details found for `{name}`: {error}"),
            "draft": serde_json::to_value(draft)?,
        }),
        AutoFillOutcome::Superseded => json!({ "status": "superseded" }),
    };
    Ok(report)
}

/// Execute one command and return its JSON output.
pub fn execute(command: &Command) -> Result<JsonValue> {
    match command {
        Command::Browse(args) => browse_report(&load_snapshot(&args.snapshot)?),
        Command::Filter(args) => {
            filter_report(&load_snapshot(&args.snapshot)?, args.dimension, &args.value)
        }
        Command::Viewport(args) => {
            let config = EngineConfig::from_env().context("invalid map configuration")?;
            viewport_report(&load_snapshot(&args.snapshot)?, config)
        }
        Command::Autofill(args) => {
            let draft = load_draft(&args.draft)?;
            let name = match &args.name {
                Some(name) => name.clone(),
                None => match draft.get("name") {
                    Some(humidor_ai::FieldValue::Text(name)) => name.clone(),
                    _ => String::new(),
                },
            };
            let lookup = FileLookup {
                path: args.candidate.clone(),
            };
            autofill_report(&draft, &name, &lookup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dimension_names() {
        assert_eq!(parse_dimension("Country"), Ok(Dimension::Country));
        assert!(parse_dimension("size").is_err());
    }

    #[test]
    fn cli_parses_filter_command() {
        let cli = Cli::try_parse_from([
            "humidor-report",
            "filter",
            "inv.json",
            "--dimension",
            "wrapper",
            "--value",
            "Maduro",
        ])
        .unwrap();
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.dimension, Dimension::Wrapper);
                assert_eq!(args.value, "Maduro");
            }
            other => panic!("expected filter, got {other:?}"),
        }
    }

    #[test]
    fn failed_lookup_reports_not_found() {
        let failing = |_: &str, _: &FieldSchema| -> Result<String, AiError> {
            Err(AiError::LookupFailed("offline".to_string()))
        };
        let draft = DraftRecord::new().with("name", "Opus X");
        let report = autofill_report(&draft, "Opus X", &failing).unwrap();
        assert_eq!(report["status"], "not_found");
        assert_eq!(report["draft"]["name"], "Opus X");
    }

    #[test]
    fn viewport_centres_on_top_country() {
        let items = vec![
            InventoryItem::new("a").with_country("Honduras").with_quantity(4.0),
            InventoryItem::new("b").with_country("Cuba").with_quantity(1.0),
        ];
        let report = viewport_report(&items, EngineConfig::default()).unwrap();
        assert_eq!(report["center"]["countryName"], "Honduras");
        assert_eq!(report["zoom"], 1.0);
    }
}
