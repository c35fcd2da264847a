//! Configuration du décodeur

use crate::cpu::AddressingContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Configuration principale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// PC et registre B utilisés pour le calcul des adresses cibles
    #[serde(default)]
    pub context: AddressingContext,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Affiche le récit pas à pas avant le résultat
    #[serde(default)]
    pub show_steps: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl DecoderConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: DecoderConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Configuration '{}' ignorée ({}), valeurs par défaut utilisées", path, e);
                Self::default()
            }
        }
    }
}
