//! Typed settings record for a pipeline run: §6's configuration table,
//! loadable from YAML and overridable field-by-field from the CLI.
//!
//! Grounded on `Config.h`/`Config.C` (the `CFG` enum and its
//! string-keyed YAML lookup), generalized the way the teacher's `Options`
//! struct in `lib.rs` bundles compression parameters into one record
//! instead of the original's untyped `map<CFG,int>`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// One pipeline run's full parameter set. Every field has a built-in
/// default so a run needs no config file at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on dynamic-slot count; >12 unlocks the extended 4-trit set.
    pub max_cdws: usize,
    /// Lower cut-off frequency for the heuristic inner filter.
    pub heur_inner_freq: u32,
    /// Lower cut-off frequency for the heuristic outer filter.
    pub heur_outer_freq: u32,
    /// Byte-length bias additive weight used when scoring candidates.
    pub heur_weight: i32,
    /// Stride of the permutation scan (must be >= 1).
    pub heur_permute: usize,
    /// Use the SAT/PBO-backed formal selector instead of the heuristic one.
    pub sat: bool,
    /// Run the two-pass (SBI-then-length) formal objective.
    pub sat_sec: bool,
    /// Conflict limit passed to the PBO solver.
    pub sat_confl: usize,
    /// Restart limit passed to the PBO solver.
    pub sat_restart: usize,
    /// Enable stage-3 repetition merging.
    pub merging: bool,
    /// 0 = no partitioning; else partition length in trits.
    pub part_size: usize,
    /// Enable the dynamic dictionary; when false, static codebook only.
    pub dynamic: bool,
    /// Run the P2S delay analysis after planning.
    pub p2s_buffer: bool,
    /// Input file is hex, 32 bits per line, instead of text trits.
    pub hex: bool,
    /// Generate `X` (don't-care) trits in synthetic input.
    pub allow_x: bool,
    /// Run the round-trip validator after emission.
    pub validate: bool,
    /// Emit a legacy (uncompressed) JTAG sequence alongside the compressed one.
    pub gen_legacy: bool,
    /// Emit the compressed JTAG sequence.
    pub gen_compressed: bool,
    /// Emit a golden file for comparison.
    pub gen_golden: bool,
    /// Build the codebook with the extended 4-trit CDW set.
    pub ext_cdws: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_cdws: 8,
            heur_inner_freq: 2,
            heur_outer_freq: 2,
            heur_weight: 1,
            heur_permute: 1,
            sat: false,
            sat_sec: false,
            sat_confl: 10_000,
            sat_restart: 100,
            merging: true,
            part_size: 0,
            dynamic: true,
            p2s_buffer: false,
            hex: false,
            allow_x: false,
            validate: true,
            gen_legacy: false,
            gen_compressed: false,
            gen_golden: false,
            ext_cdws: false,
        }
    }
}

impl Config {
    /// Loads a config from a YAML file under a top-level `tdr_codec` key,
    /// same shape as the original's `vecthor` top-level map. A field absent
    /// from the file keeps its built-in default.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| Error::Config(format!("malformed YAML: {e}")))?;
        let section = doc.get("tdr_codec").cloned().unwrap_or(doc);
        serde_yaml::from_value(section).map_err(|e| Error::Config(format!("{e}")))
    }

    /// `max_cdws > 12` implies the extended CDW set is needed to give every
    /// slot a distinct encoding.
    pub fn effective_ext_cdws(&self) -> bool {
        self.ext_cdws || self.max_cdws > 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_no_config_file() {
        let cfg = Config::default();
        assert_eq!(cfg.max_cdws, 8);
        assert!(cfg.validate);
        assert!(!cfg.sat);
    }

    #[test]
    fn yaml_overrides_only_the_fields_it_names() {
        let yaml = "tdr_codec:\n  max_cdws: 16\n  sat: true\n";
        let cfg = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.max_cdws, 16);
        assert!(cfg.sat);
        assert!(cfg.merging); // untouched default
    }

    #[test]
    fn large_max_cdws_implies_extended_set() {
        let mut cfg = Config::default();
        cfg.max_cdws = 20;
        assert!(cfg.effective_ext_cdws());
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = Config::from_yaml_str("not: [valid").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
