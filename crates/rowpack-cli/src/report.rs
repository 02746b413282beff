//! Input parsing and output formatting for the CLI.

use rowpack_layout::{Item, ItemListBuilder, LayoutError, Row, RowConfig};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Item list could not be read, or rows could not be written, as JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Grid config was not valid YAML.
    #[error("Invalid grid config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Items or configuration were rejected by the layout.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Unknown `--format` value.
    #[error("Unknown output format: {0} (expected text or json)")]
    Format(String),
}

/// One input record: `{"aspect_ratio": 1.5, "key": "photo-1"}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ItemSpec {
    pub(crate) aspect_ratio: f32,
    #[serde(default)]
    pub(crate) key: Option<String>,
}

/// Parse and validate a JSON array of item specs.
pub(crate) fn parse_items(json: &str) -> Result<Vec<Item<String>>, CliError> {
    let specs: Vec<ItemSpec> = serde_json::from_str(json)?;
    let mut builder = ItemListBuilder::new();
    builder.items(specs, |s| s.key.clone(), |s| s.aspect_ratio, |_| ())?;
    Ok(builder.build())
}

/// Parse a YAML grid config; missing fields take their defaults.
pub(crate) fn parse_config(yaml: &str) -> Result<RowConfig, CliError> {
    let config: RowConfig = serde_yaml_ng::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

/// Output format for rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Text,
    Json,
}

impl std::str::FromStr for Format {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::Format(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
struct ItemReport {
    key: Option<String>,
    aspect_ratio: f32,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct RowReport {
    key: String,
    height: u32,
    width: u32,
    items: Vec<ItemReport>,
}

fn row_reports(rows: &[Row<String>], horizontal_padding: u32) -> Vec<RowReport> {
    rows.iter()
        .map(|row| RowReport {
            key: row.key(),
            height: row.height(),
            width: row.width(horizontal_padding),
            items: row
                .items()
                .iter()
                .map(|item| ItemReport {
                    key: item.key().cloned(),
                    aspect_ratio: item.aspect_ratio(),
                    width: item.width,
                    height: item.height,
                })
                .collect(),
        })
        .collect()
}

/// Render rows in the requested format.
pub(crate) fn render_rows(
    rows: &[Row<String>],
    horizontal_padding: u32,
    format: Format,
) -> Result<String, CliError> {
    let reports = row_reports(rows, horizontal_padding);
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&reports)?),
        Format::Text => {
            let mut out = String::new();
            for (i, row) in reports.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "row {}: {} item(s), height {}, width {}",
                    i,
                    row.items.len(),
                    row.height,
                    row.width
                );
                for item in &row.items {
                    let _ = writeln!(
                        out,
                        "  {:<16} {:>5}x{:<5} (ratio {:.3})",
                        item.key.as_deref().unwrap_or("-"),
                        item.width,
                        item.height,
                        item.aspect_ratio
                    );
                }
            }
            Ok(out)
        }
    }
}
