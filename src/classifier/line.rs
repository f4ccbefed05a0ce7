// Line-shape classification for transaction-log exports.

use lazy_static::lazy_static;
use log::trace;
use memchr::memchr_iter;
use regex::Regex;

use crate::types::{LineCategory, LineRecord};

lazy_static! {
    // Parenthesized MM:SS token at the start of the line; everything after
    // the closing parenthesis is the remainder.
    static ref TIMESTAMP: Regex = Regex::new(r"^\((\d{2}:\d{2})\)(.*)$").unwrap();
    static ref ARABIC_RUN: Regex = Regex::new(r"[\u{0600}-\u{06FF}]+").unwrap();
    static ref ENGLISH_CODE: Regex = Regex::new(r"[A-Z]{2,}:\d+").unwrap();
    static ref ACCOUNT_CODE: Regex = Regex::new(r"CA:\d+").unwrap();
    static ref BANK_CODE: Regex = Regex::new(r"\d{8}[A-Z0-9]+").unwrap();
    // Descriptive text: Latin letters, digits, apostrophes and whitespace only.
    static ref HEADER_LINE: Regex = Regex::new(r"^[A-Za-z\s'\d]+$").unwrap();
}

/// Classify one raw line into a [`LineRecord`].
///
/// Total function: ambiguous input falls into `MixedContent` instead of
/// failing. Classification depends on `raw_text` alone; `index` only
/// labels the record's position in the input sequence.
pub fn classify(raw_text: &str, index: usize) -> LineRecord {
    if raw_text.trim().is_empty() {
        return LineRecord::bare(raw_text, index, LineCategory::Empty);
    }

    if let Some(caps) = TIMESTAMP.captures(raw_text) {
        let remainder = caps.get(2).map_or("", |m| m.as_str());
        let mut record = LineRecord::bare(raw_text, index, LineCategory::TimestampedEntry);
        record.timestamp = Some(caps[1].to_string());
        record.remainder = remainder.to_string();
        // Four independent extraction passes. A substring may be claimed by
        // more than one pattern; no precedence is enforced between them.
        record.arabic_runs = find_all(&ARABIC_RUN, remainder);
        record.english_codes = find_all(&ENGLISH_CODE, remainder);
        record.account_codes = find_all(&ACCOUNT_CODE, remainder);
        record.bank_codes = find_all(&BANK_CODE, remainder);
        record.separator_count = separator_count(remainder);
        return record;
    }

    if HEADER_LINE.is_match(raw_text) {
        return LineRecord::bare(raw_text, index, LineCategory::Header);
    }

    trace!("line {} fell through to mixed content", index);
    LineRecord::bare(raw_text, index, LineCategory::MixedContent)
}

fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count of `/` separators in a remainder. `/` is ASCII, so a byte scan
/// is exact on UTF-8 text.
pub fn separator_count(text: &str) -> usize {
    memchr_iter(b'/', text.as_bytes()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineCategory;

    #[test]
    fn empty_and_whitespace_lines() {
        for raw in ["", "   ", "\t"] {
            let record = classify(raw, 1);
            assert_eq!(record.category, LineCategory::Empty);
            assert!(record.timestamp.is_none());
            assert!(record.arabic_runs.is_empty());
        }
    }

    #[test]
    fn timestamped_entry_with_two_arabic_runs() {
        let raw = "(06:51)شركةأسواقومخابزال/شركةأسواقومخابزالمختار";
        let record = classify(raw, 1);
        assert_eq!(record.category, LineCategory::TimestampedEntry);
        assert_eq!(record.timestamp.as_deref(), Some("06:51"));
        assert_eq!(record.arabic_runs.len(), 2);
        assert_eq!(record.separator_count, 1);
    }

    #[test]
    fn timestamp_with_no_payload() {
        let record = classify("(01:28)", 3);
        assert_eq!(record.category, LineCategory::TimestampedEntry);
        assert_eq!(record.timestamp.as_deref(), Some("01:28"));
        assert_eq!(record.remainder, "");
        assert!(record.arabic_runs.is_empty());
        assert!(record.english_codes.is_empty());
        assert!(record.account_codes.is_empty());
        assert!(record.bank_codes.is_empty());
        assert_eq!(record.separator_count, 0);
    }

    #[test]
    fn header_line() {
        let record = classify("Unidentified Deposits Movement Aug'2025", 4);
        assert_eq!(record.category, LineCategory::Header);
        assert!(record.timestamp.is_none());
        assert_eq!(record.remainder, "");
    }

    #[test]
    fn bank_code_entry() {
        let raw = "(11:02)20250901SABSFRBSFR6BCFT12302807881/SAMAA";
        let record = classify(raw, 11);
        assert_eq!(record.category, LineCategory::TimestampedEntry);
        assert!(!record.bank_codes.is_empty());
        assert!(record.bank_codes[0].starts_with("20250901"));
        assert_eq!(record.separator_count, 1);
    }

    #[test]
    fn account_code_also_counts_as_english_code() {
        // CA:236 satisfies both the generic code shape and the account
        // shape; the passes are independent, so both lists carry it.
        let raw = "(11:10)مؤسسةشروقالبيضاء/مؤسسةشروقالبيضاء/CA:236";
        let record = classify(raw, 10);
        assert_eq!(record.account_codes, vec!["CA:236"]);
        assert_eq!(record.english_codes, vec!["CA:236"]);
        assert_eq!(record.separator_count, 2);
    }

    #[test]
    fn arabic_without_timestamp_is_mixed_content() {
        let record = classify("شركة التعاون mixed with Latin", 7);
        assert_eq!(record.category, LineCategory::MixedContent);
        assert!(record.arabic_runs.is_empty());
    }

    #[test]
    fn malformed_timestamp_is_not_an_entry() {
        // One-digit minutes do not satisfy the MM:SS grammar.
        let record = classify("(6:51)شركة", 2);
        assert_eq!(record.category, LineCategory::MixedContent);
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn classification_is_idempotent() {
        let raw = "(11:38)مؤسسةدارسلتيللتجا/مؤسسةدارسلتيللتجارة/CA";
        assert_eq!(classify(raw, 5), classify(raw, 5));
    }

    #[test]
    fn separator_count_matches_literal_count() {
        assert_eq!(separator_count(""), 0);
        assert_eq!(separator_count("a/b//c"), 3);
        assert_eq!(separator_count("شركة/مؤسسة"), 1);
    }

    #[test]
    fn remainder_is_exact_trailing_substring() {
        let record = classify("(03:07)طارقعبداللهابراهيم/طارقعبداللهابراهيمالس", 3);
        assert_eq!(record.remainder, "طارقعبداللهابراهيم/طارقعبداللهابراهيمالس");
        assert_eq!(record.raw_text, "(03:07)طارقعبداللهابراهيم/طارقعبداللهابراهيمالس");
    }
}
