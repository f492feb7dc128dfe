//! Quant report: one flat row per scanned seed.
//!
//! Columns: `seed, strength, drift, fire, iters, pruned_tangents, consent_factor`.
//! Seeds are free text, so fields containing a comma, quote or line break
//! are quoted with inner quotes doubled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scanner::AisRecord;

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "ais_quant.csv";

/// CSV header, in column order.
pub const REPORT_COLUMNS: [&str; 7] = [
    "seed",
    "strength",
    "drift",
    "fire",
    "iters",
    "pruned_tangents",
    "consent_factor",
];

/// One report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantRow {
    pub seed: String,
    pub strength: f64,
    pub drift: f64,
    pub fire: f64,
    pub iters: usize,
    pub pruned_tangents: usize,
    pub consent_factor: f64,
}

impl From<&AisRecord> for QuantRow {
    fn from(record: &AisRecord) -> Self {
        let result = &record.result;
        Self {
            seed: record.seed.clone(),
            strength: result.chains.hypothesis_strength,
            drift: result.srm.ethics_drift,
            fire: result.srm.fire_integrity,
            iters: result.iters,
            pruned_tangents: result.srm.pruned_tangents.unwrap_or(0),
            consent_factor: result.consent_factor.unwrap_or(1.0),
        }
    }
}

impl QuantRow {
    fn fields(&self) -> [String; 7] {
        [
            escape_field(&self.seed),
            format!("{:?}", self.strength),
            format!("{:?}", self.drift),
            format!("{:?}", self.fire),
            self.iters.to_string(),
            self.pruned_tangents.to_string(),
            format!("{:?}", self.consent_factor),
        ]
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write header plus one line per row.
pub fn write_quant_report<W: Write>(rows: &[QuantRow], mut out: W) -> Result<()> {
    writeln!(out, "{}", REPORT_COLUMNS.join(","))?;
    for row in rows {
        writeln!(out, "{}", row.fields().join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// Render the report in memory.
pub fn quant_report_string(rows: &[QuantRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_quant_report(rows, &mut buf)?;
    // Every byte written came from `String`s.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the report for `records` to `path`.
///
/// Refuses an empty batch rather than writing a header-only file.
pub fn quant_report(records: &[AisRecord], path: impl AsRef<Path>) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(Error::EmptyBatch);
    }
    let rows: Vec<QuantRow> = records.iter().map(QuantRow::from).collect();
    let path = path.as_ref();

    let file = File::create(path)?;
    write_quant_report(&rows, BufWriter::new(file))?;

    tracing::info!(rows = rows.len(), path = %path.display(), "wrote quant report");
    Ok(path.to_path_buf())
}
