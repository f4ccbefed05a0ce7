// Offline dictionary translation for deposit-description vocabulary.

use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::error::{Error, Result};
use super::{Translator, UNTRANSLATED_PLACEHOLDER};

// Vocabulary observed in the deposit exports: business terms, common
// personal names, locations.
const BUILTIN_TERMS: &[(&str, &str)] = &[
    // Business terms
    ("شركة", "Company"),
    ("مؤسسة", "Foundation"),
    ("تجارة", "Trade"),
    ("أسواق", "Markets"),
    ("مخابز", "Bakeries"),
    ("تمويل", "Financing"),
    ("خدمات", "Services"),
    ("استثمار", "Investment"),
    ("تطوير", "Development"),
    ("إدارة", "Management"),
    ("تقنية", "Technology"),
    ("هندسة", "Engineering"),
    ("استشارات", "Consulting"),
    ("مقاولات", "Contracting"),
    ("صناعات", "Industries"),
    ("النقل", "Transportation"),
    ("اللوجستية", "Logistics"),
    // Common names
    ("محمد", "Mohammed"),
    ("أحمد", "Ahmed"),
    ("علي", "Ali"),
    ("عبدالله", "Abdullah"),
    ("ابراهيم", "Ibrahim"),
    ("خالد", "Khalid"),
    ("سعد", "Saad"),
    ("فهد", "Fahad"),
    // Locations
    ("الرياض", "Riyadh"),
    ("جدة", "Jeddah"),
    ("مكة", "Mecca"),
    ("المدينة", "Medina"),
    ("الدمام", "Dammam"),
];

/// Term-table translator. Lookup order: exact match, then longest-first
/// substring replacement over every known term, then caption fallbacks.
pub struct DictionaryTranslator {
    // Sorted by key length descending so longer terms are replaced before
    // any term they contain
    terms: Vec<(String, String)>,
}

impl DictionaryTranslator {
    pub fn new() -> Self {
        let mut translator = Self::empty();
        for (arabic, english) in BUILTIN_TERMS {
            translator.insert(arabic, english);
        }
        translator
    }

    pub fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn insert(&mut self, arabic: &str, english: &str) {
        let key_len = arabic.chars().count();
        let position = self
            .terms
            .iter()
            .position(|(existing, _)| existing.chars().count() < key_len)
            .unwrap_or(self.terms.len());
        self.terms.insert(position, (arabic.to_string(), english.to_string()));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Load `arabic=english` term pairs from a file, one per line. Lines
    /// starting with `#` are skipped. A missing file is not an error; the
    /// built-in vocabulary stays in effect.
    pub fn load_terms<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        let file = match File::open(path_ref) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Could not find terms file: {:?} ({})", path_ref, e);
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
            if let Some((arabic, english)) = line.split_once('=') {
                let arabic = arabic.trim();
                let english = english.trim();
                if !arabic.is_empty() && !english.is_empty() {
                    self.insert(arabic, english);
                    count += 1;
                }
            } else {
                warn!("Skipping malformed term line (expected arabic=english): {}", line);
            }
        }

        info!("Loaded {} custom terms from {:?}", count, path_ref);
        Ok(())
    }
}

impl Default for DictionaryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for DictionaryTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if source != "ar" || target != "en" {
            return Err(Error::translation(format!(
                "dictionary covers ar -> en only, not {} -> {}",
                source, target
            )));
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        // Exact hit
        if let Some((_, english)) = self.terms.iter().find(|(arabic, _)| arabic == text) {
            return Ok(english.clone());
        }

        // Substring replacement, longest terms first
        let mut result = text.to_string();
        let mut replaced = false;
        for (arabic, english) in &self.terms {
            if result.contains(arabic.as_str()) {
                result = result.replace(arabic.as_str(), english);
                replaced = true;
            }
        }
        if replaced {
            return Ok(result);
        }

        // Caption fallbacks for text the tables do not cover
        if text.contains("شركة") {
            Ok(format!("Company ({})", UNTRANSLATED_PLACEHOLDER))
        } else if text.contains("مؤسسة") {
            Ok(format!("Institution ({})", UNTRANSLATED_PLACEHOLDER))
        } else {
            Ok(UNTRANSLATED_PLACEHOLDER.to_string())
        }
    }

    fn name(&self) -> &str {
        "local dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn exact_match_wins() {
        let dictionary = DictionaryTranslator::new();
        assert_eq!(dictionary.translate("شركة", "ar", "en").unwrap(), "Company");
    }

    #[test]
    fn partial_terms_are_replaced_in_place() {
        let dictionary = DictionaryTranslator::new();
        let result = dictionary.translate("شركة أسواق ومخابز", "ar", "en").unwrap();
        assert!(result.contains("Company"));
        assert!(result.contains("Markets"));
        assert!(result.contains("Bakeries"));
    }

    #[test]
    fn longer_terms_are_replaced_before_contained_ones() {
        let mut dictionary = DictionaryTranslator::empty();
        dictionary.insert("عبد", "Abd");
        dictionary.insert("عبدالله", "Abdullah");
        let result = dictionary.translate("طارق عبدالله", "ar", "en").unwrap();
        assert!(result.contains("Abdullah"));
        assert!(!result.contains("Abdالله"));
    }

    #[test]
    fn unknown_text_falls_back_to_placeholder() {
        let dictionary = DictionaryTranslator::empty();
        assert_eq!(
            dictionary.translate("طعام", "ar", "en").unwrap(),
            UNTRANSLATED_PLACEHOLDER
        );
    }

    #[test]
    fn unknown_company_text_gets_a_caption() {
        let dictionary = DictionaryTranslator::empty();
        let result = dictionary.translate("شركةمجهولة", "ar", "en").unwrap();
        assert_eq!(result, "Company (Arabic text)");
    }

    #[test]
    fn unsupported_language_pair_is_an_error() {
        let dictionary = DictionaryTranslator::new();
        assert!(dictionary.translate("شركة", "ar", "fr").is_err());
        assert!(dictionary.translate("Company", "en", "ar").is_err());
    }

    #[test]
    fn custom_terms_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# extra vocabulary\nالمختار = Al-Mukhtar").unwrap();

        let mut dictionary = DictionaryTranslator::new();
        dictionary.load_terms(file.path()).unwrap();
        let result = dictionary.translate("أسواق المختار", "ar", "en").unwrap();
        assert!(result.contains("Al-Mukhtar"));
        assert!(result.contains("Markets"));
    }

    #[test]
    fn missing_terms_file_is_not_an_error() {
        let mut dictionary = DictionaryTranslator::new();
        assert!(dictionary.load_terms("no/such/terms.txt").is_ok());
    }
}
