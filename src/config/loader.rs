//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading charter-party
//! terms presets from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::TermsPreset;

/// Loads and provides access to charter-party terms presets.
///
/// The `ConfigLoader` reads every `*.yaml` file in a directory, one preset
/// per file:
///
/// ```text
/// config/charter_terms/
/// ├── shinc.yaml     # Sundays and holidays included
/// ├── shex.yaml      # Sundays and holidays excepted
/// └── wwd_shex.yaml  # Weather working days, SHEX
/// ```
///
/// # Example
///
/// ```no_run
/// use laytime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/charter_terms").unwrap();
/// let shex = loader.get_preset("shex").unwrap();
/// println!("{}: {} rules", shex.name, shex.exception_rules.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    presets: BTreeMap<String, TermsPreset>,
}

impl ConfigLoader {
    /// Loads every preset in the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the directory is missing or holds no presets
    /// - [`EngineError::ConfigParseError`] if a file is not a valid preset, or two
    ///   files share a code
    /// - [`EngineError::InvalidTerms`] if a preset rule's rate is outside 0-100
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let dir_str = path.display().to_string();

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "yaml") {
                files.push(file);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no preset files found)", dir_str),
            });
        }

        let mut presets = Vec::with_capacity(files.len());
        for file in &files {
            let preset = Self::load_yaml::<TermsPreset>(file)?;
            debug!(
                path = %file.display(),
                code = %preset.code,
                rules = preset.exception_rules.len(),
                "Loaded terms preset"
            );
            presets.push(preset);
        }

        Self::from_presets(presets).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: dir_str,
                message,
            },
            other => other,
        })
    }

    /// Builds a loader from presets already in memory.
    ///
    /// Codes are matched case-insensitively.
    pub fn from_presets(presets: impl IntoIterator<Item = TermsPreset>) -> EngineResult<Self> {
        let mut by_code = BTreeMap::new();

        for mut preset in presets {
            preset.validate()?;
            preset.code = preset.code.trim().to_lowercase();
            let code = preset.code.clone();
            if by_code.insert(code.clone(), preset).is_some() {
                return Err(EngineError::ConfigParseError {
                    path: code.clone(),
                    message: format!("duplicate preset code '{}'", code),
                });
            }
        }

        Ok(Self { presets: by_code })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a preset by its code.
    pub fn get_preset(&self, code: &str) -> EngineResult<&TermsPreset> {
        self.presets
            .get(&code.trim().to_lowercase())
            .ok_or_else(|| EngineError::PresetNotFound {
                code: code.to_string(),
            })
    }

    /// Returns all presets, ordered by code.
    pub fn presets(&self) -> impl Iterator<Item = &TermsPreset> {
        self.presets.values()
    }
}
