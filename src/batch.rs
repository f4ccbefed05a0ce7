// Batch fix-and-translate flow over one table column.

use indicatif::ProgressBar;
use log::{debug, info};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::subsystems::ProcessorConfig;
use crate::config::SijillConfig;
use crate::error::Result;
use crate::fixer::{is_arabic, ArabicFixer};
use crate::table::{ColumnSelector, ColumnTable, RowRange};
use crate::translate::{translate_or_original, Translator, UNTRANSLATED_PLACEHOLDER};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub source_column: ColumnSelector,
    pub fixed_column: String,
    pub translated_column: String,
    pub rows: RowRange,
    pub source_lang: String,
    pub target_lang: String,
    pub sample_limit: usize,
}

impl BatchOptions {
    pub fn from_config(config: &SijillConfig) -> Result<Self> {
        Self::from_parts(&config.processor, &config.translator.source_lang, &config.translator.target_lang)
    }

    fn from_parts(processor: &ProcessorConfig, source_lang: &str, target_lang: &str) -> Result<Self> {
        Ok(Self {
            source_column: processor.source_selector(),
            fixed_column: processor.fixed_column.clone(),
            translated_column: processor.translated_column.clone(),
            rows: processor.row_range()?,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            sample_limit: processor.sample_limit,
        })
    }
}

/// One previewed row of batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    /// Spreadsheet row number (header is row 1).
    pub row: usize,
    pub original: String,
    pub fixed: String,
    pub translation: String,
    pub confidence: u8,
}

/// Outcome summary of one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Non-empty source cells visited in the row range.
    pub total_processed: usize,
    /// Arabic cells that came back with a real translation.
    pub translated: usize,
    /// Mean fixer confidence over Arabic cells, in percent.
    pub average_confidence: u8,
    /// Service tags in first-use order, deduplicated.
    pub services_used: Vec<String>,
    pub samples: Vec<SampleRow>,
    pub elapsed: Duration,
}

/// Drives the fix-and-translate flow. Both collaborators are injected;
/// the processor never constructs a translation service itself.
pub struct BatchProcessor<'a> {
    fixer: &'a ArabicFixer,
    translator: &'a dyn Translator,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(fixer: &'a ArabicFixer, translator: &'a dyn Translator) -> Self {
        Self { fixer, translator }
    }

    /// Walk the configured row range of the source column: Arabic cells
    /// are fixed and translated, anything else passes through unchanged
    /// into both output columns.
    ///
    /// Table errors abort the whole batch; translation failures never do
    /// (the original text is substituted).
    pub fn process(
        &self,
        table: &mut ColumnTable,
        options: &BatchOptions,
        progress: Option<&ProgressBar>,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let source_index = options.source_column.resolve(table)?;
        let fixed_index = table.ensure_column(&options.fixed_column);
        let translated_index = table.ensure_column(&options.translated_column);
        let range = options.rows.clamp_to(table.row_count());

        info!(
            "Batch over data rows {}..{} (source column {}, outputs '{}'/'{}')",
            range.start, range.end, source_index, options.fixed_column, options.translated_column
        );

        let mut report = BatchReport::default();
        let mut confidence_sum: u64 = 0;
        let mut arabic_cells: u64 = 0;

        for row in range {
            if let Some(bar) = progress {
                bar.inc(1);
            }

            let original = match table.cell(row, source_index) {
                Some(cell) => cell.to_string(),
                None => continue,
            };
            if original.trim().is_empty() {
                continue;
            }

            report.total_processed += 1;

            if is_arabic(&original) {
                let outcome = self.fixer.fix(&original);
                let (translation, service) = translate_or_original(
                    self.translator,
                    &outcome.fixed,
                    &options.source_lang,
                    &options.target_lang,
                );

                arabic_cells += 1;
                confidence_sum += u64::from(outcome.confidence);
                if service.is_some() && translation != UNTRANSLATED_PLACEHOLDER {
                    report.translated += 1;
                }
                if let Some(tag) = service {
                    if !report.services_used.contains(&tag) {
                        report.services_used.push(tag);
                    }
                }
                if report.samples.len() < options.sample_limit {
                    report.samples.push(SampleRow {
                        row: row + 2,
                        original: original.clone(),
                        fixed: outcome.fixed.clone(),
                        translation: translation.clone(),
                        confidence: outcome.confidence,
                    });
                }

                debug!("row {}: fixed and translated Arabic cell", row + 2);
                table.set_cell(row, fixed_index, outcome.fixed);
                table.set_cell(row, translated_index, translation);
            } else {
                // Non-Arabic content passes through to both columns
                table.set_cell(row, fixed_index, original.clone());
                table.set_cell(row, translated_index, original);
            }
        }

        if arabic_cells > 0 {
            report.average_confidence = (confidence_sum / arabic_cells) as u8;
        }
        report.elapsed = start.elapsed();

        info!(
            "Batch finished: {} cells processed, {} translated, average confidence {}%",
            report.total_processed, report.translated, report.average_confidence
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct StubTranslator;

    impl Translator for StubTranslator {
        fn translate(&self, text: &str, _source: &str, _target: &str) -> crate::error::Result<String> {
            Ok(format!("[en] {}", text))
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str, _source: &str, _target: &str) -> crate::error::Result<String> {
            Err(Error::translation("service down"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn sample_table() -> ColumnTable {
        ColumnTable::from_reader(
            "id,description\n\
             1,شركةأسواقومخابزالمختار\n\
             2,Unidentified Deposits\n\
             3,\n\
             4,مؤسسةشروقالبيضاء\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn options() -> BatchOptions {
        BatchOptions {
            source_column: ColumnSelector::Name("description".to_string()),
            fixed_column: "AC".to_string(),
            translated_column: "AD".to_string(),
            rows: RowRange::new(2, 400).unwrap(),
            source_lang: "ar".to_string(),
            target_lang: "en".to_string(),
            sample_limit: 5,
        }
    }

    #[test]
    fn arabic_cells_are_fixed_and_translated() {
        let fixer = ArabicFixer::new_with_defaults();
        let translator = StubTranslator;
        let mut table = sample_table();

        let report = BatchProcessor::new(&fixer, &translator)
            .process(&mut table, &options(), None)
            .unwrap();

        // Empty cell on row 4 is skipped
        assert_eq!(report.total_processed, 3);
        assert_eq!(report.translated, 2);
        assert_eq!(report.services_used, vec!["stub".to_string()]);
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.samples[0].row, 2);

        let fixed_column = table.column_index("AC").unwrap();
        let translated_column = table.column_index("AD").unwrap();
        assert!(table.cell(0, fixed_column).unwrap().starts_with("شركة "));
        assert!(table.cell(0, translated_column).unwrap().starts_with("[en] "));
        // Non-Arabic content passes through unchanged
        assert_eq!(table.cell(1, fixed_column), Some("Unidentified Deposits"));
        assert_eq!(table.cell(1, translated_column), Some("Unidentified Deposits"));
    }

    #[test]
    fn translation_failures_keep_the_original_text() {
        let fixer = ArabicFixer::new_with_defaults();
        let translator = FailingTranslator;
        let mut table = sample_table();

        let report = BatchProcessor::new(&fixer, &translator)
            .process(&mut table, &options(), None)
            .unwrap();

        assert_eq!(report.translated, 0);
        assert!(report.services_used.is_empty());

        let fixed_column = table.column_index("AC").unwrap();
        let translated_column = table.column_index("AD").unwrap();
        // The translated column holds the fixed Arabic, not an error
        assert_eq!(table.cell(0, translated_column), table.cell(0, fixed_column));
    }

    #[test]
    fn missing_source_column_aborts_the_batch() {
        let fixer = ArabicFixer::new_with_defaults();
        let translator = StubTranslator;
        let mut table = sample_table();
        let mut bad_options = options();
        bad_options.source_column = ColumnSelector::Name("missing".to_string());

        assert!(BatchProcessor::new(&fixer, &translator)
            .process(&mut table, &bad_options, None)
            .is_err());
    }

    #[test]
    fn average_confidence_covers_arabic_cells_only() {
        let fixer = ArabicFixer::new_with_defaults();
        let translator = StubTranslator;
        let mut table = sample_table();

        let report = BatchProcessor::new(&fixer, &translator)
            .process(&mut table, &options(), None)
            .unwrap();

        // Row 2 hits a known pattern (95), row 5 an indicator (80)
        assert_eq!(report.average_confidence, (95 + 80) / 2);
    }

    #[test]
    fn row_range_limits_processing() {
        let fixer = ArabicFixer::new_with_defaults();
        let translator = StubTranslator;
        let mut table = sample_table();
        let mut narrow = options();
        narrow.rows = RowRange::new(2, 2).unwrap();

        let report = BatchProcessor::new(&fixer, &translator)
            .process(&mut table, &narrow, None)
            .unwrap();
        assert_eq!(report.total_processed, 1);
    }
}
