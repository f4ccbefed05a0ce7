// src/config/subsystems/fixer.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixerConfig {
    // Text repair settings
    pub normalize_arabic: bool,
    pub remove_diacritics: bool,
    pub remove_tatweel: bool,
    pub segment_compounds: bool,

    // Optional file of extra glued=spaced replacement pairs
    pub patterns_file: Option<PathBuf>,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            // Hamza folding changes the text handed to the translator, so
            // it stays off unless a matching pipeline asks for it.
            normalize_arabic: false,
            remove_diacritics: true,
            remove_tatweel: true,
            segment_compounds: true,
            patterns_file: None,
        }
    }
}

impl FromIni for FixerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "text_fixing" {
            return None;
        }

        match key {
            "normalize_arabic" => {
                match value.parse() {
                    Ok(flag) => {
                        self.normalize_arabic = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid normalize_arabic value (must be true/false): {}", value)
                    ))),
                }
            },
            "remove_diacritics" => {
                match value.parse() {
                    Ok(flag) => {
                        self.remove_diacritics = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid remove_diacritics value (must be true/false): {}", value)
                    ))),
                }
            },
            "remove_tatweel" => {
                match value.parse() {
                    Ok(flag) => {
                        self.remove_tatweel = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid remove_tatweel value (must be true/false): {}", value)
                    ))),
                }
            },
            "segment_compounds" => {
                match value.parse() {
                    Ok(flag) => {
                        self.segment_compounds = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid segment_compounds value (must be true/false): {}", value)
                    ))),
                }
            },
            "patterns_file" => {
                let file_path = PathBuf::from(value.trim_matches('"'));
                self.patterns_file = Some(file_path);
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FixerConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.patterns_file {
            // Only warn if file doesn't exist, don't fail
            if !path.exists() {
                log::warn!("Segmentation patterns file not found: {:?}", path);
            }
        }
        Ok(())
    }

    /// Returns a description of the current text fixing configuration
    pub fn describe(&self) -> String {
        let mut description = Vec::new();

        if self.remove_diacritics {
            description.push("removing diacritical marks".to_string());
        }
        if self.remove_tatweel {
            description.push("removing tatweel".to_string());
        }
        if self.segment_compounds {
            description.push("segmenting run-together compounds".to_string());
        }
        if self.normalize_arabic {
            description.push("normalizing Arabic characters".to_string());
        }
        if let Some(path) = &self.patterns_file {
            description.push(format!("using extra patterns from {:?}", path));
        }

        if description.is_empty() {
            "no text fixing applied".to_string()
        } else {
            description.join(", ")
        }
    }
}
