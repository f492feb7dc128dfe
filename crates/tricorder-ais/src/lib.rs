//! AIS layer for the tricorder
//!
//! Wraps the core scan with the checks the AIS standards ask for:
//!
//! - **Consent** (principle 8): seeds carrying unconsented-data markers get a
//!   reduced `consent_factor`. Reported, never enforced.
//! - **Tangents**: low-weight edges are counted before the scan and, in
//!   strict mode, withheld from it.
//! - **Quant export** (principle 7): batch runs produce one CSV row per
//!   seed.
//!
//! # Example
//!
//! ```no_run
//! use tricorder_ais::{quant_report, AisScanner};
//!
//! let scanner = AisScanner::default();
//! let records = scanner.scan_batch(["debug latency", "unconsented bias_source notes"]);
//! quant_report(&records, "ais_quant.csv").unwrap();
//! ```

mod batch;
mod consent;
mod error;
mod report;
mod scanner;
mod tangent;

pub use batch::{parse_seeds, read_seeds};
pub use consent::{consent_factor, consent_hits, CONSENT_MARKERS, CONSENT_PENALTY};
pub use error::{Error, Result};
pub use report::{
    quant_report, quant_report_string, write_quant_report, QuantRow, DEFAULT_REPORT_FILE, REPORT_COLUMNS,
};
pub use scanner::{ais_scan, AisRecord, AisScanner};
pub use tangent::{tangent_filter, TangentSplit, TANGENT_THRESH};
