// src/config/subsystems/translator.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub source_lang: String,
    pub target_lang: String,

    // Optional file of extra arabic=english term pairs
    pub terms_file: Option<PathBuf>,

    // When set, only the built-in dictionary is consulted; no external
    // services are added to the chain.
    pub offline_only: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_lang: "ar".to_string(),
            target_lang: "en".to_string(),
            terms_file: None,
            offline_only: true,
        }
    }
}

impl FromIni for TranslatorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "translator" {
            return None;
        }

        match key {
            "source_lang" => {
                let lang = value.trim_matches('"').to_lowercase();
                if lang.is_empty() {
                    Some(Err(Error::Config("source_lang must not be empty".to_string())))
                } else {
                    self.source_lang = lang;
                    Some(Ok(()))
                }
            },
            "target_lang" => {
                let lang = value.trim_matches('"').to_lowercase();
                if lang.is_empty() {
                    Some(Err(Error::Config("target_lang must not be empty".to_string())))
                } else {
                    self.target_lang = lang;
                    Some(Ok(()))
                }
            },
            "terms_file" => {
                let file_path = PathBuf::from(value.trim_matches('"'));
                self.terms_file = Some(file_path);
                Some(Ok(()))
            },
            "offline_only" => {
                match value.parse() {
                    Ok(flag) => {
                        self.offline_only = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid offline_only value (must be true/false): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl TranslatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.source_lang.is_empty() || self.target_lang.is_empty() {
            return Err(Error::Config(
                "source_lang and target_lang must not be empty".to_string()
            ));
        }

        if self.source_lang == self.target_lang {
            return Err(Error::Config(format!(
                "source_lang and target_lang must differ (both are '{}')",
                self.source_lang
            )));
        }

        if let Some(path) = &self.terms_file {
            if !path.exists() {
                log::warn!("Translation terms file not found: {:?}", path);
            }
        }

        Ok(())
    }

    pub fn describe(&self) -> String {
        let mut description = vec![format!(
            "translating {} -> {}",
            self.source_lang, self.target_lang
        )];

        if self.offline_only {
            description.push("offline dictionary only".to_string());
        }
        if let Some(path) = &self.terms_file {
            description.push(format!("using extra terms from {:?}", path));
        }

        description.join(", ")
    }
}
