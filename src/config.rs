use crate::error::Result;
use crate::settings::ModelParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how results are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// CSV of coded cells
    pub model_path: PathBuf,
    /// Plain-text run report
    pub report_path: PathBuf,
    /// Also write uncoded cells, with value -1
    pub include_missing: bool,
    /// Decimal places for exported values
    pub precision: usize,
    /// Dump every z level to stdout
    pub print_slices: bool,
    /// Directory for per-level PNG images, skipped when None
    pub slice_dir: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.csv"),
            report_path: PathBuf::from("model_report.txt"),
            include_missing: false,
            precision: 6,
            print_slices: false,
            slice_dir: None,
        }
    }
}

/// Complete run configuration for export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Growth parameters
    pub params: ModelParams,
    /// RNG seed; drawn fresh when None
    pub rng_seed: Option<u64>,
    /// Output files and formatting
    pub output: OutputSettings,
}

impl ModelConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            params: ModelParams::default(),
            rng_seed: None,
            output: OutputSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::DepositType;
    use crate::error::ModelError;
    use crate::grid::{Coordinate, Dimensions};
    use crate::settings::DecayRule;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ModelConfig {
            version: 1,
            params: ModelParams {
                dims: Dimensions::new(40, 30, 20),
                average: 1.5,
                stdev: 0.1,
                max_blocks: 250,
                min_blocks: Some(20),
                code_chance: 0.8,
                direction_boost: 0.25,
                deposit: DepositType::Tabular,
                decay: DecayRule::Truncated,
                seed_location: Some(Coordinate::new(10, 11, 12)),
            },
            rng_seed: Some(42),
            output: OutputSettings {
                model_path: PathBuf::from("out/deposit.csv"),
                report_path: PathBuf::from("out/deposit.txt"),
                include_missing: true,
                precision: 3,
                print_slices: true,
                slice_dir: Some(PathBuf::from("out/slices")),
            },
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ModelConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.params.dims, Dimensions::new(40, 30, 20));
        assert_eq!(parsed.params.average, 1.5);
        assert_eq!(parsed.params.stdev, 0.1);
        assert_eq!(parsed.params.max_blocks, 250);
        assert_eq!(parsed.params.code_chance, 0.8);
        assert_eq!(parsed.params.direction_boost, 0.25);
        assert_eq!(parsed.params.decay, DecayRule::Truncated);
        assert_eq!(parsed.params.min_blocks, Some(20));
        assert_eq!(parsed.params.deposit, DepositType::Tabular);
        assert_eq!(parsed.params.seed_location, Some(Coordinate::new(10, 11, 12)));
        assert_eq!(parsed.rng_seed, Some(42));
        assert_eq!(parsed.output, config.output);
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = ModelConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = ModelConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.params.max_blocks, config.params.max_blocks);
        assert_eq!(loaded.rng_seed, None);
        assert_eq!(loaded.output, OutputSettings::default());
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = ModelConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ModelError::Serialization(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ModelConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(matches!(result, Err(ModelError::Io(_))));
    }
}
