//! Scan configuration.
//!
//! Defaults: α = 0.7, β = 0.3, relevance threshold 0.5, convergence above
//! 0.85, edges capped at 20 and weighted 0.8, tangents at or below 0.6.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Scan domain. Only [`Domain::Poetic`] changes the numbers; every other
/// value, including unrecognized ones, takes the default exploration branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Domain {
    #[default]
    Tech,
    Poetic,
    Research,
    /// Any other label. Accepted silently.
    Other(String),
}

impl Domain {
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Tech => "tech",
            Domain::Poetic => "poetic",
            Domain::Research => "research",
            Domain::Other(label) => label,
        }
    }

    pub fn is_poetic(&self) -> bool {
        matches!(self, Domain::Poetic)
    }
}

impl From<&str> for Domain {
    fn from(label: &str) -> Self {
        match label {
            "tech" => Domain::Tech,
            "poetic" => Domain::Poetic,
            "research" => Domain::Research,
            other => Domain::Other(other.to_string()),
        }
    }
}

impl From<String> for Domain {
    fn from(label: String) -> Self {
        Domain::from(label.as_str())
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.as_str().to_string()
    }
}

impl FromStr for Domain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Domain::from(s))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan domain (default: tech).
    pub domain: Domain,

    /// Maximum update iterations (default: 3).
    pub max_iters: usize,

    /// Tangent depth: hop bound for the relational traversal (default: 3).
    pub td_max: usize,

    /// Edge survives pruning iff `weight * ∇R[0] > rf_thresh` (default: 0.5).
    pub rf_thresh: f64,

    /// Step size on the exploration term (default: 0.7).
    pub alpha: f64,

    /// Step size on the perturbation term (default: 0.3).
    pub beta: f64,

    /// Loop exits once the convergence score exceeds this (default: 0.85).
    pub convergence_threshold: f64,

    /// Maximum number of edges emitted by the graph builder (default: 20).
    pub edge_cap: usize,

    /// Constant weight carried by every edge (default: 0.8).
    pub edge_weight: f64,

    /// Edges at or below this weight are tangents (default: 0.6).
    pub tangent_thresh: f64,

    /// Feed only non-tangent edges into the AIS scan (default: false).
    pub strict_tangents: bool,

    /// Capacity of a scanner's private graph cache (default: 128).
    pub cache_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            domain: Domain::Tech,
            max_iters: 3,
            td_max: 3,
            rf_thresh: 0.5,
            alpha: 0.7,
            beta: 0.3,
            convergence_threshold: 0.85,
            edge_cap: 20,
            edge_weight: 0.8,
            tangent_thresh: 0.6,
            strict_tangents: false,
            cache_capacity: 128,
        }
    }
}

impl ScanConfig {
    pub fn with_domain(mut self, domain: impl Into<Domain>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_td_max(mut self, td_max: usize) -> Self {
        self.td_max = td_max;
        self
    }

    pub fn with_strict_tangents(mut self, strict: bool) -> Self {
        self.strict_tangents = strict;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.max_iters == 0 {
            return Err(Error::config("max_iters", "must be >= 1"));
        }
        if self.edge_cap == 0 {
            return Err(Error::config("edge_cap", "must be >= 1"));
        }
        if self.cache_capacity == 0 {
            return Err(Error::config("cache_capacity", "must be >= 1"));
        }
        for (field, value) in [
            ("edge_weight", self.edge_weight),
            ("tangent_thresh", self.tangent_thresh),
            ("convergence_threshold", self.convergence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(field, format!("must be in [0, 1], got {value}")));
            }
        }
        for (field, value) in [
            ("rf_thresh", self.rf_thresh),
            ("alpha", self.alpha),
            ("beta", self.beta),
        ] {
            if !value.is_finite() {
                return Err(Error::config(field, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Create config from environment variables, falling back to defaults.
    ///
    /// Reads `TRICORDER_DOMAIN`, `TRICORDER_MAX_ITERS`, `TRICORDER_TD_MAX`,
    /// `TRICORDER_RF_THRESH` and `TRICORDER_STRICT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ScanConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(domain) = lookup("TRICORDER_DOMAIN") {
            config.domain = Domain::from(domain.trim());
        }
        if let Some(v) = parse_var::<_, usize>(&lookup, "TRICORDER_MAX_ITERS")? {
            config.max_iters = v;
        }
        if let Some(v) = parse_var::<_, usize>(&lookup, "TRICORDER_TD_MAX")? {
            config.td_max = v;
        }
        if let Some(v) = parse_var::<_, f64>(&lookup, "TRICORDER_RF_THRESH")? {
            config.rf_thresh = v;
        }
        if let Some(v) = parse_var::<_, bool>(&lookup, "TRICORDER_STRICT")? {
            config.strict_tangents = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Config file if one is given, otherwise the `TRICORDER_*` environment.
    ///
    /// The file replaces the environment entirely; variables are not merged
    /// into it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Self::from_env(),
        }
    }

    /// Same as [`ScanConfig::load`] with an arbitrary variable source.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Self::from_lookup(lookup),
        }
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(Error::InvalidEnv { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_iters, 3);
        assert_eq!(config.td_max, 3);
        assert_eq!(config.edge_cap, 20);
    }

    #[test]
    fn unknown_domain_is_accepted() {
        let domain = Domain::from("astrology");
        assert_eq!(domain, Domain::Other("astrology".into()));
        assert!(!domain.is_poetic());
        assert_eq!(domain.to_string(), "astrology");
    }

    #[test]
    fn domain_serializes_as_label() {
        let json = serde_json::to_string(&Domain::Poetic).unwrap();
        assert_eq!(json, "\"poetic\"");
        let back: Domain = serde_json::from_str("\"research\"").unwrap();
        assert_eq!(back, Domain::Research);
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let config = ScanConfig::default().with_max_iters(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { field: "max_iters", .. })
        ));

        let config = ScanConfig {
            edge_weight: 1.5,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScanConfig {
            alpha: f64::NAN,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ScanConfig::from_lookup(lookup_from(&[
            ("TRICORDER_DOMAIN", "poetic"),
            ("TRICORDER_MAX_ITERS", "5"),
            ("TRICORDER_STRICT", "true"),
        ]))
        .unwrap();

        assert_eq!(config.domain, Domain::Poetic);
        assert_eq!(config.max_iters, 5);
        assert_eq!(config.td_max, 3);
        assert!(config.strict_tangents);
    }

    #[test]
    fn lookup_reports_unparseable_values() {
        let err = ScanConfig::from_lookup(lookup_from(&[("TRICORDER_TD_MAX", "deep")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { name: "TRICORDER_TD_MAX", .. }));
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_fills_defaults() {
        let file = config_file(r#"{"domain": "poetic", "td_max": 2}"#);
        let config = ScanConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.domain, Domain::Poetic);
        assert_eq!(config.td_max, 2);
        assert_eq!(config.max_iters, 3);
        assert_eq!(config.edge_cap, 20);
    }

    #[test]
    fn file_with_zero_iterations_is_rejected() {
        let file = config_file(r#"{"max_iters": 0}"#);
        assert!(matches!(
            ScanConfig::from_json_file(file.path()),
            Err(Error::InvalidConfig { field: "max_iters", .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let file = config_file("{ max_iters: ");
        assert!(matches!(
            ScanConfig::from_json_file(file.path()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(ScanConfig::from_json_file(&path), Err(Error::Io(_))));
    }

    #[test]
    fn file_wins_over_environment() {
        let file = config_file(r#"{"max_iters": 9}"#);
        let env = lookup_from(&[("TRICORDER_MAX_ITERS", "5"), ("TRICORDER_DOMAIN", "poetic")]);

        let config = ScanConfig::load_with(Some(file.path()), &env).unwrap();
        assert_eq!(config.max_iters, 9);
        assert_eq!(config.domain, Domain::Tech);

        let config = ScanConfig::load_with(None, &env).unwrap();
        assert_eq!(config.max_iters, 5);
        assert_eq!(config.domain, Domain::Poetic);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"max_iters": 7}"#).unwrap();
        assert_eq!(config.max_iters, 7);
        assert_eq!(config.rf_thresh, 0.5);
        assert_eq!(config.domain, Domain::Tech);
    }
}
