// Arabic text repair for run-together spreadsheet cells.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::config::subsystems::FixerConfig;
use crate::error::Result;

lazy_static! {
    static ref DIACRITICS: Regex = Regex::new(r"[\u{064B}-\u{065F}\u{0670}]").unwrap();
    static ref TATWEEL: Regex = Regex::new(r"\u{0640}").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

// Words that open a company/institution name; a following word glued
// directly onto them marks a segmentation point.
const COMPANY_INDICATORS: [&str; 4] = ["شركة", "مؤسسة", "معهد", "مكتب"];

// Confidence scoring for local repair: base level, bumps for known
// patterns and recognized indicators, capped below certainty.
const BASE_CONFIDENCE: u8 = 70;
const PATTERN_BONUS: u8 = 15;
const INDICATOR_BONUS: u8 = 10;
const MAX_CONFIDENCE: u8 = 95;

/// True if any character's code point lies in the Arabic block
/// (U+0600-U+06FF).
pub fn is_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Result of one repair pass: the fixed text and a heuristic confidence
/// score in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub fixed: String,
    pub confidence: u8,
}

#[derive(Clone)]
pub struct ArabicFixer {
    settings: FixerConfig,
    // Glued compound -> spaced replacement, applied before any other
    // segmentation
    patterns: Vec<(String, String)>,
}

impl ArabicFixer {
    pub fn new(settings: FixerConfig) -> Self {
        Self {
            settings,
            patterns: default_patterns(),
        }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(FixerConfig::default())
    }

    // Convenience method to load extra patterns directly from the config
    pub fn load_patterns_from_config(&mut self, config: &FixerConfig) -> Result<()> {
        if let Some(path) = &config.patterns_file {
            debug!("Loading segmentation patterns from config path: {:?}", path);
            self.load_patterns(path)
        } else {
            debug!("No patterns file specified in config");
            Ok(())
        }
    }

    /// Load `glued=spaced` replacement pairs from a file, one per line.
    /// Lines starting with `#` are skipped. A missing file is not an
    /// error; the built-in patterns stay in effect.
    pub fn load_patterns<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        let file = match File::open(path_ref) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Could not find patterns file: {:?} ({})", path_ref, e);
                return Ok(());
            },
            Err(e) => return Err(e.into()),
        };

        let reader = io::BufReader::new(file);
        let mut count = 0;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((glued, spaced)) = line.split_once('=') {
                let glued = glued.trim();
                let spaced = spaced.trim();
                if !glued.is_empty() && !spaced.is_empty() {
                    self.patterns.push((glued.to_string(), spaced.to_string()));
                    count += 1;
                }
            } else {
                warn!("Skipping malformed pattern line (expected glued=spaced): {}", line);
            }
        }

        info!("Loaded {} segmentation patterns from {:?}", count, path_ref);
        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn normalize_char(&self, c: char) -> char {
        match c {
            'ئ' | 'ى' | 'ي' => 'ي',
            'ة' => 'ه',
            'أ' | 'إ' | 'آ' => 'ا',
            'ؤ' => 'و',
            _ => c,
        }
    }

    /// Repair one cell of Arabic text. Pure and total: unrecognized text
    /// passes through with base confidence.
    pub fn fix(&self, text: &str) -> FixOutcome {
        let mut result = text.to_string();
        let mut confidence = BASE_CONFIDENCE;

        if self.settings.remove_diacritics {
            result = DIACRITICS.replace_all(&result, "").into_owned();
        }
        if self.settings.remove_tatweel {
            result = TATWEEL.replace_all(&result, "").into_owned();
        }

        if self.settings.segment_compounds {
            let mut pattern_hit = false;
            for (glued, spaced) in &self.patterns {
                if result.contains(glued.as_str()) {
                    result = result.replace(glued.as_str(), spaced);
                    pattern_hit = true;
                }
            }
            if pattern_hit {
                confidence += PATTERN_BONUS;
            }

            // A word glued onto an indicator gets split off; the
            // whitespace collapse below absorbs doubled spaces.
            for indicator in COMPANY_INDICATORS {
                if result.contains(indicator) {
                    let spaced = format!("{} ", indicator);
                    result = result.replace(indicator, &spaced);
                }
            }
        }

        let has_indicator = COMPANY_INDICATORS.iter().any(|w| result.contains(w));

        // Normalization last: it folds characters the segmentation tables
        // key on.
        if self.settings.normalize_arabic {
            result = result.chars().map(|c| self.normalize_char(c)).collect();
        }

        result = WHITESPACE.replace_all(result.trim(), " ").into_owned();

        if has_indicator {
            confidence += INDICATOR_BONUS;
        }

        FixOutcome {
            fixed: result,
            confidence: confidence.min(MAX_CONFIDENCE),
        }
    }
}

fn default_patterns() -> Vec<(String, String)> {
    // Glued compounds observed in the deposit exports
    [
        ("شركةأسواقومخابز", "شركة أسواق ومخابز"),
        ("مؤسسةدارسلتيللتجا", "مؤسسة دار سلتي للتجارة"),
        ("تمويناتوتينمدىللم", "تمويلات وتين مدى للمواد"),
        ("طارقعبداللهابراهيم", "طارق عبدالله ابراهيم"),
    ]
    .iter()
    .map(|(glued, spaced)| (glued.to_string(), spaced.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn detects_arabic_block() {
        assert!(is_arabic("شركة"));
        assert!(is_arabic("CA:236/شركة"));
        assert!(!is_arabic("Unidentified Deposits"));
        assert!(!is_arabic(""));
    }

    #[test]
    fn known_pattern_is_segmented() {
        let fixer = ArabicFixer::new_with_defaults();
        let outcome = fixer.fix("شركةأسواقومخابزالمختار");
        assert!(outcome.fixed.starts_with("شركة أسواق ومخابز"));
        // Base + pattern + indicator, capped
        assert_eq!(outcome.confidence, 95);
    }

    #[test]
    fn indicator_glued_to_following_word_is_split() {
        let fixer = ArabicFixer::new_with_defaults();
        let outcome = fixer.fix("مؤسسةشروقالبيضاء");
        assert!(outcome.fixed.starts_with("مؤسسة "));
        assert_eq!(outcome.confidence, 80);
    }

    #[test]
    fn unrecognized_text_passes_through() {
        let fixer = ArabicFixer::new_with_defaults();
        let outcome = fixer.fix("طعام");
        assert_eq!(outcome.fixed, "طعام");
        assert_eq!(outcome.confidence, 70);
    }

    #[test]
    fn diacritics_and_tatweel_are_removed() {
        let fixer = ArabicFixer::new_with_defaults();
        // fatha + tatweel inside a plain word
        let outcome = fixer.fix("كَـتب");
        assert_eq!(outcome.fixed, "كتب");
    }

    #[test]
    fn whitespace_is_collapsed() {
        let fixer = ArabicFixer::new_with_defaults();
        let outcome = fixer.fix("  طارق   عبدالله  ");
        assert_eq!(outcome.fixed, "طارق عبدالله");
    }

    #[test]
    fn normalization_folds_hamza_variants() {
        let mut settings = FixerConfig::default();
        settings.normalize_arabic = true;
        let fixer = ArabicFixer::new(settings);
        let outcome = fixer.fix("أإآ");
        assert_eq!(outcome.fixed, "ااا");
    }

    #[test]
    fn extra_patterns_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom pairs\nتمويناتعربةلينللم = تمويلات عربة لين للمواد").unwrap();

        let mut fixer = ArabicFixer::new_with_defaults();
        let before = fixer.pattern_count();
        fixer.load_patterns(file.path()).unwrap();
        assert_eq!(fixer.pattern_count(), before + 1);

        let outcome = fixer.fix("تمويناتعربةلينللم");
        assert!(outcome.fixed.contains("عربة لين"));
    }

    #[test]
    fn missing_patterns_file_is_not_an_error() {
        let mut fixer = ArabicFixer::new_with_defaults();
        assert!(fixer.load_patterns("no/such/patterns.txt").is_ok());
    }
}
