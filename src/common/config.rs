//! Tour configuration.
//!
//! Configuration is plain YAML:
//!
//! ```yaml
//! sve_vector_bits: 256
//! skip_unsupported: true
//! demos:
//!   - sse-load
//!   - sve-load-s32
//! ```
//!
//! Every field is optional; an empty document yields [`TourConfig::default`].

use crate::arm::sve::model::VectorLength;
use crate::common::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every demonstration in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TourConfig {
    /// Vector length, in bits, of the modelled SVE/SVE2 registers.
    pub sve_vector_bits: u32,
    /// Skip demonstrations whose instruction set is unavailable instead of failing.
    pub skip_unsupported: bool,
    /// Demonstrations to run; empty means the whole catalog.
    pub demos: Vec<String>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            sve_vector_bits: VectorLength::MIN_BITS,
            skip_unsupported: true,
            demos: Vec::new(),
        }
    }
}

impl TourConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse tour config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        log::debug!("Loaded tour config from {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize tour config: {}", e)))
    }

    /// Check field values that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        self.vector_length().map(|_| ())
    }

    /// The modelled SVE vector length.
    pub fn vector_length(&self) -> Result<VectorLength> {
        VectorLength::new(self.sve_vector_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TourConfig::default();
        assert_eq!(config.sve_vector_bits, 128);
        assert!(config.skip_unsupported);
        assert!(config.demos.is_empty());
        assert_eq!(config.vector_length().unwrap().cntw(), 4);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(TourConfig::from_yaml_str("  \n").unwrap(), TourConfig::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = TourConfig::from_yaml_str("sve_vector_bits: 512\ndemos: [sve-load-s32]\n").unwrap();
        assert_eq!(config.sve_vector_bits, 512);
        assert!(config.skip_unsupported);
        assert_eq!(config.demos, vec!["sve-load-s32".to_string()]);
    }

    #[test]
    fn test_rejects_bad_vector_length() {
        let err = TourConfig::from_yaml_str("sve_vector_bits: 200").unwrap_err();
        assert!(matches!(err, Error::InvalidVectorLength(200)));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = TourConfig::from_yaml_str("vector_bits: 256").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TourConfig {
            sve_vector_bits: 1024,
            skip_unsupported: false,
            demos: vec!["avx2-memory".into()],
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(TourConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sve_vector_bits: 256").unwrap();
        writeln!(file, "skip_unsupported: false").unwrap();

        let config = TourConfig::load(file.path()).unwrap();
        assert_eq!(config.sve_vector_bits, 256);
        assert!(!config.skip_unsupported);
    }

    #[test]
    fn test_missing_file() {
        let err = TourConfig::load("/nonexistent/tour.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
