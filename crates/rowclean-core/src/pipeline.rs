//! Row cleaning pipeline — sanitizes records and drops repeat phone numbers
//!
//! A single pass over the records, in input order:
//!
//! 1. Normalize the Number column
//! 2. Drop the record if that number was already seen in this run
//! 3. Scrub Name, Gender and Points
//! 4. Normalize Birthday and Anniversary
//!
//! The seen-number set is owned by the call, so concurrent runs share nothing.
//! Empty numbers never take part in deduplication.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::classify_date;
use crate::parser::table::{Record, Table};
use crate::roles::RoleColumns;
use crate::sanitize;

// ── Options and report ────────────────────────────────────

/// Which rules a run applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanMode {
    /// Every field rule plus deduplication
    #[default]
    Full,
    /// Number normalization and deduplication only
    DedupOnly,
}

impl std::fmt::Display for CleanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanMode::Full => write!(f, "full"),
            CleanMode::DedupOnly => write!(f, "dedup-only"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub mode: CleanMode,
}

/// Counters for one cleaning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub mode: CleanMode,
    pub roles: RoleColumns,
    pub rows_read: usize,
    pub rows_written: usize,
    pub duplicates_dropped: usize,
    pub dates_normalized: usize,
    pub dates_unchanged: usize,
}

/// Cleaned table plus the run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub table: Table,
    pub report: CleanReport,
}

// ── Pipeline ──────────────────────────────────────────────

/// Clean a parsed table
pub fn clean_table(table: Table, options: &CleanOptions) -> CleanOutcome {
    let roles = RoleColumns::resolve(&table.header);
    let mut report = CleanReport {
        mode: options.mode,
        roles: roles.clone(),
        rows_read: table.records.len(),
        ..CleanReport::default()
    };

    let mut seen_numbers: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::with_capacity(table.records.len());

    for mut record in table.records {
        if let Some(idx) = roles.number {
            let number = sanitize::phone_number(record.get(idx));
            if !number.is_empty() && !seen_numbers.insert(number.clone()) {
                debug!(line = record.source_line, number = %number, "dropping duplicate row");
                report.duplicates_dropped += 1;
                continue;
            }
            record.set(idx, number);
        }

        if options.mode == CleanMode::Full {
            scrub_fields(&mut record, &roles);
            normalize_dates(&mut record, &roles, &mut report);
        }

        cleaned.push(record);
    }

    report.rows_written = cleaned.len();
    debug!(
        rows_read = report.rows_read,
        rows_written = report.rows_written,
        duplicates = report.duplicates_dropped,
        "cleaning run finished"
    );

    CleanOutcome {
        table: Table {
            header: table.header,
            records: cleaned,
        },
        report,
    }
}

fn scrub_fields(record: &mut Record, roles: &RoleColumns) {
    scrub(record, roles.name, sanitize::name);
    scrub(record, roles.gender, sanitize::gender);
    scrub(record, roles.points, sanitize::points);
}

/// Apply `rule` to a non-empty value in `column`
fn scrub(record: &mut Record, column: Option<usize>, rule: fn(&str) -> String) {
    let Some(idx) = column else { return };
    if record.get(idx).is_empty() {
        return;
    }
    let value = rule(record.get(idx));
    record.set(idx, value);
}

fn normalize_dates(record: &mut Record, roles: &RoleColumns, report: &mut CleanReport) {
    for column in [roles.birthday, roles.anniversary].into_iter().flatten() {
        if record.get(column).is_empty() {
            continue;
        }
        let outcome = classify_date(record.get(column));
        if outcome.is_canonical() {
            report.dates_normalized += 1;
        } else {
            report.dates_unchanged += 1;
        }
        record.set(column, outcome.into_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(input: &str) -> CleanOutcome {
        clean_table(parse(input).unwrap(), &CleanOptions::default())
    }

    fn column(outcome: &CleanOutcome, name: &str) -> Vec<String> {
        let idx = outcome.table.column_index(name).unwrap();
        outcome
            .table
            .records
            .iter()
            .map(|r| r.get(idx).to_string())
            .collect()
    }

    #[test]
    fn test_duplicate_numbers_keep_first() {
        let out = run("Number,Name\n9876543210,First\n+91-9876543210,Second\n");
        assert_eq!(out.table.records.len(), 1);
        assert_eq!(column(&out, "Name"), vec!["First"]);
        assert_eq!(out.report.duplicates_dropped, 1);
    }

    #[test]
    fn test_byte_order_mark_does_not_hide_roles() {
        let out = run("\u{feff}Name,Number\nJohn3 Doe!,+919876543210\n");
        assert!(!out.report.roles.number_is_fallback);
        assert_eq!(column(&out, "Name"), vec!["John Doe"]);
        assert_eq!(column(&out, "Number"), vec!["9876543210"]);
    }

    #[test]
    fn test_empty_numbers_never_deduplicated() {
        let out = run("Number,Name\n,A\nn/a,B\n,C\n");
        assert_eq!(column(&out, "Name"), vec!["A", "B", "C"]);
        assert_eq!(column(&out, "Number"), vec!["", "", ""]);
    }

    #[test]
    fn test_order_of_first_appearance_preserved() {
        let out = run("Number\n3\n1\n3\n2\n1\n");
        assert_eq!(column(&out, "Number"), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_number_falls_back_to_first_column() {
        let out = run("Mobile,Name\n(987) 654-3210,A\n9876543210,B\n");
        assert!(out.report.roles.number_is_fallback);
        assert_eq!(column(&out, "Mobile"), vec!["9876543210"]);
    }

    #[test]
    fn test_all_field_rules_applied() {
        let out = run(
            "Number,Name,Gender,Points,Birthday,Anniversary\n\
             +919876543210,John3 Doe!,M.,1 200,20/08/1995,19950820\n",
        );
        let row = &out.table.records[0];
        assert_eq!(
            row.values,
            vec!["9876543210", "John Doe", "M", "1200", "1995-08-20", "1995-08-20"]
        );
        assert_eq!(out.report.dates_normalized, 2);
    }

    #[test]
    fn test_unparseable_dates_pass_through() {
        let out = run("Number,Birthday,Anniversary\n1,someday,\n");
        assert_eq!(out.table.records[0].values, vec!["1", "someday", ""]);
        assert_eq!(out.report.dates_unchanged, 1);
        assert_eq!(out.report.dates_normalized, 0);
    }

    #[test]
    fn test_missing_role_columns_are_skipped() {
        let out = run("Number,Notes\n1,Hello 42!\n");
        assert_eq!(out.table.records[0].values, vec!["1", "Hello 42!"]);
    }

    #[test]
    fn test_dedup_only_mode_leaves_other_columns() {
        let table = parse("Number,Name,Birthday\n+919876543210,J0hn,20/08/1995\n9876543210,X,\n")
            .unwrap();
        let out = clean_table(
            table,
            &CleanOptions {
                mode: CleanMode::DedupOnly,
            },
        );
        assert_eq!(out.table.records.len(), 1);
        assert_eq!(
            out.table.records[0].values,
            vec!["9876543210", "J0hn", "20/08/1995"]
        );
        assert_eq!(out.report.mode, CleanMode::DedupOnly);
    }

    #[test]
    fn test_report_counts() {
        let out = run("Number\n1\n1\n2\n\n2\n");
        assert_eq!(out.report.rows_read, 4);
        assert_eq!(out.report.rows_written, 2);
        assert_eq!(out.report.duplicates_dropped, 2);
    }

    #[test]
    fn test_header_unchanged() {
        let out = run(" Number , Name \n1,a\n");
        assert_eq!(out.table.header, vec!["Number", "Name"]);
    }

    #[test]
    fn test_clean_mode_from_config_text() {
        let options: CleanOptions = serde_json::from_str(r#"{"mode":"dedup-only"}"#).unwrap();
        assert_eq!(options.mode, CleanMode::DedupOnly);
        let defaulted: CleanOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted.mode, CleanMode::Full);
    }
}
