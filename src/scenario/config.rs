// src/scenario/config.rs

//! TOML scenario files.
//!
//! ```toml
//! [cost]
//! slots_per_wte = 8.0
//! annual_cost_per_wte = 60000.0
//!
//! [[scenario]]
//! name = "Baseline"
//! capacity_per_day = 16.0
//!
//! [[scenario]]
//! name = "Two extra clinicians"
//! capacity_per_day = 32.0
//! ```
//!
//! Any parameter left out of a `[[scenario]]` table takes its default.

use crate::error::{Result, WaitlistError};
use crate::scenario::comparison::Scenario;
use crate::scenario::cost::CostModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub cost: CostModel,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioFile {
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self> {
        let file: Self = toml::from_str(source).map_err(|source| WaitlistError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        file.validate()?;
        Ok(file)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| WaitlistError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&source, path)?;
        debug!(
            path = %path.display(),
            scenarios = file.scenarios.len(),
            "loaded scenario file"
        );
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scenarios.is_empty() {
            return Err(WaitlistError::NoScenarios);
        }
        for scenario in &self.scenarios {
            scenario.params.validate()?;
        }
        Ok(())
    }

    pub fn baseline(&self) -> Option<&Scenario> {
        self.scenarios.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationParameters;
    use std::io::Write;

    const SAMPLE: &str = r#"
[cost]
slots_per_wte = 10.0

[[scenario]]
name = "Baseline"

[[scenario]]
name = "More slots"
capacity_per_day = 20.0
seed = 7
"#;

    #[test]
    fn test_parse_sample() {
        let file = ScenarioFile::from_toml_str(SAMPLE, Path::new("sample.toml")).unwrap();
        assert_eq!(file.cost.slots_per_wte, 10.0);
        assert_eq!(file.cost.annual_cost_per_wte, 60_000.0);
        assert_eq!(file.scenarios.len(), 2);
        assert_eq!(file.baseline().map(|s| s.name.as_str()), Some("Baseline"));
        assert_eq!(file.scenarios[0].params, SimulationParameters::default());
        assert_eq!(file.scenarios[1].params.capacity_per_day, 20.0);
        assert_eq!(file.scenarios[1].params.seed, 7);
        assert_eq!(file.scenarios[1].params.days, 180);
    }

    #[test]
    fn test_no_scenarios_is_rejected() {
        let result = ScenarioFile::from_toml_str("[cost]\n", Path::new("empty.toml"));
        assert!(matches!(result, Err(WaitlistError::NoScenarios)));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let source = "[[scenario]]\nname = \"Broken\"\ndays = 0\n";
        let result = ScenarioFile::from_toml_str(source, Path::new("broken.toml"));
        assert!(matches!(
            result,
            Err(WaitlistError::InvalidParameter { name: "days", .. })
        ));
    }

    #[test]
    fn test_syntax_error_reports_path() {
        let result = ScenarioFile::from_toml_str("[[scenario]\n", Path::new("bad.toml"));
        match result {
            Err(err @ WaitlistError::ConfigParse { .. }) => {
                assert!(err.to_string().contains("bad.toml"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let loaded = ScenarioFile::load(file.path()).unwrap();
        assert_eq!(loaded.scenarios.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = ScenarioFile::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(WaitlistError::ConfigRead { .. })));
    }
}
