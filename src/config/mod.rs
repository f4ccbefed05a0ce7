pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{trace, warn};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SijillConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub fixer: subsystems::FixerConfig,
    pub translator: subsystems::TranslatorConfig,
    pub processor: subsystems::ProcessorConfig,
}

impl SijillConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.fixer.validate()?;
        self.translator.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        let absolute_path = std::fs::canonicalize(&path)
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        trace!("Loading configuration from: {:?}", absolute_path);

        let content = fs::read_to_string(&path)?;

        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "file" => config.files.from_ini_section(&current_section, key, value),
                    "text_fixing" => config.fixer.from_ini_section(&current_section, key, value),
                    "translator" => config.translator.from_ini_section(&current_section, key, value),
                    "processor" => config.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                } {
                    if let Err(e) = result {
                        warn!("Error processing config key {}={}: {}", key, value, e);
                    }
                } else {
                    warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for SijillConfig {
    fn default() -> Self {
        Self {
            files: file::FileConfig::default(),
            fixer: subsystems::FixerConfig::default(),
            translator: subsystems::TranslatorConfig::default(),
            processor: subsystems::ProcessorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(SijillConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_full_ini() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "# sijill configuration\n\
             [file]\n\
             input_file = data/deposits.csv\n\
             output_dir = out\n\
             \n\
             [text_fixing]\n\
             normalize_arabic = false\n\
             segment_compounds = true\n\
             \n\
             [translator]\n\
             source_lang = ar\n\
             target_lang = en\n\
             offline_only = true\n\
             \n\
             [processor]\n\
             first_row = 2\n\
             last_row = 50\n\
             source_column = M\n\
             unknown_key = ignored"
        )
        .unwrap();

        let config = SijillConfig::from_ini(file.path()).unwrap();
        assert_eq!(config.files.input_file, std::path::PathBuf::from("data/deposits.csv"));
        assert_eq!(config.processor.last_row, 50);
        assert_eq!(config.processor.source_column, "M");
        assert!(config.translator.offline_only);
        assert!(config.fixer.segment_compounds);
    }

    #[test]
    fn invalid_row_range_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[processor]\nfirst_row = 40\nlast_row = 10").unwrap();
        assert!(SijillConfig::from_ini(file.path()).is_err());
    }
}
