// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub report_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("data/input.csv"),
            output_dir: PathBuf::from("data/output"),
            report_dir: PathBuf::from("reports"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "input_file" => {
                self.input_file = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "output_dir" => {
                self.output_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "report_dir" => {
                self.report_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "logs_dir" => {
                self.logs_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("input_file", &self.input_file),
            ("output_dir", &self.output_dir),
            ("report_dir", &self.report_dir),
            ("logs_dir", &self.logs_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
