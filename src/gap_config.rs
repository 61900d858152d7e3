
/*!
Contains configuration information for the gap resolution engine.
Typical usage is to use the builder to construct the config, e.g.
```
use gap_con::gap_config::{GapConfig, GapConfigBuilder};
let config: GapConfig = GapConfigBuilder::default()
    .k(25)
    .min_identity(0.95)
    .build()
    .unwrap();
assert!(config.validate().is_ok());
```
*/

use simple_error::{bail, SimpleError};

/**
Contains configuration information for the gap resolution engine.
Typical usage is to use the builder to construct the config, e.g.
```
use gap_con::gap_config::{GapConfig, GapConfigBuilder};
let config: GapConfig = GapConfigBuilder::default()
    .k(25)
    .min_identity(0.95)
    .build()
    .unwrap();
assert!(config.validate().is_ok());
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct GapConfig {
    /// The k-mer size; adjacent contigs overlap by k-1 absent contrary evidence. Required, must be > 0.
    pub k: usize,
    /// Acceptable error of a distance estimate, added to the target gap length during search
    pub distance_error: i64,
    /// Maximum number of candidate branches to align
    pub max_branches: usize,
    /// Minimum identity fraction to accept a consensus
    pub min_identity: f64,
    /// Search cost ceiling; a gap whose search visits more nodes than this is abandoned as too complex
    pub max_cost: usize
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            // there is no sensible default k, callers must set it; validate() enforces this
            k: 0,
            // 6 bp of slack covers typical distance estimate noise
            distance_error: 6,
            // aligning more than a handful of branches rarely produces a clean consensus
            max_branches: 4,
            // consensus acceptance is deliberately strict
            min_identity: 0.9,
            // large enough for real tangles, small enough to keep pathological regions cheap
            max_cost: 100_000
        }
    }
}

impl GapConfig {
    /// Checks the fatal preconditions before any resolution starts.
    /// # Errors
    /// * if k is unset or the identity fraction is out of range
    pub fn validate(&self) -> Result<(), SimpleError> {
        if self.k == 0 {
            bail!("k-mer size must be set and greater than zero");
        }
        if !(0.0..=1.0).contains(&self.min_identity) {
            bail!("minimum identity must be within [0, 1]");
        }
        Ok(())
    }
}
