pub mod dictionary;

use log::{debug, warn};

use crate::error::{Error, Result};

pub use self::dictionary::DictionaryTranslator;

/// Caption used when no translation could be produced at all. Batch
/// reporting does not count it as a successful translation.
pub const UNTRANSLATED_PLACEHOLDER: &str = "Arabic text";

/// A translation capability. Batch code receives one of these as an
/// explicit parameter; it never constructs a service on its own, so tests
/// can substitute a deterministic stub.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;

    /// Service tag recorded in batch reports.
    fn name(&self) -> &str;

    /// Translate and report which service produced the result. Composite
    /// translators override this to surface the inner service.
    fn translate_tagged(&self, text: &str, source: &str, target: &str) -> Result<(String, String)> {
        self.translate(text, source, target)
            .map(|translated| (translated, self.name().to_string()))
    }
}

/// Failure-absorbing translation: any error yields the original text
/// unchanged and no service tag. Errors are logged, never propagated.
pub fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    source: &str,
    target: &str,
) -> (String, Option<String>) {
    match translator.translate_tagged(text, source, target) {
        Ok((translated, service)) => {
            debug!("translated {:?} via {}", text, service);
            (translated, Some(service))
        },
        Err(e) => {
            warn!("translation failed, keeping original text: {}", e);
            (text.to_string(), None)
        },
    }
}

/// Ordered list of translators tried by priority; the first success wins.
/// Individual failures are logged and the chain falls through; only an
/// exhausted chain is an error.
#[derive(Default)]
pub struct ChainTranslator {
    translators: Vec<Box<dyn Translator>>,
}

impl ChainTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, translator: Box<dyn Translator>) -> Self {
        self.translators.push(translator);
        self
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

impl Translator for ChainTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.translate_tagged(text, source, target)
            .map(|(translated, _)| translated)
    }

    fn name(&self) -> &str {
        "chain"
    }

    fn translate_tagged(&self, text: &str, source: &str, target: &str) -> Result<(String, String)> {
        for translator in &self.translators {
            match translator.translate_tagged(text, source, target) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    warn!("translator '{}' failed, trying next: {}", translator.name(), e);
                },
            }
        }
        Err(Error::translation(format!(
            "all {} translators failed",
            self.translators.len()
        )))
    }
}
