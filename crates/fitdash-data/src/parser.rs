//! Converts string-keyed rows from the tracker export into typed records.
//!
//! Numeric fields are coerced leniently: blank or absent fields become `0`,
//! unparseable or negative values become `0` with a [`FieldCoercionWarning`].
//! The date is the only structural field; a row whose date does not match
//! the configured format yields a [`ParseError`] and no record.

use std::collections::HashMap;

use chrono::NaiveDate;
use fitdash_common::{ActivityRecord, InvalidDatePolicy, ParsingConfig};
use tracing::{debug, warn};

use crate::error::{CoercionReason, FieldCoercionWarning, LoadError, ParseError};
use crate::loader::Dataset;

pub type RawRow = HashMap<String, String>;

pub mod columns {
    pub const ID: &str = "Id";
    pub const ACTIVITY_DATE: &str = "ActivityDate";
    pub const TOTAL_STEPS: &str = "TotalSteps";
    pub const CALORIES: &str = "Calories";
    pub const TOTAL_DISTANCE: &str = "TotalDistance";
    pub const VERY_ACTIVE_MINUTES: &str = "VeryActiveMinutes";
    pub const FAIRLY_ACTIVE_MINUTES: &str = "FairlyActiveMinutes";
    pub const LIGHTLY_ACTIVE_MINUTES: &str = "LightlyActiveMinutes";
    pub const SEDENTARY_MINUTES: &str = "SedentaryMinutes";

    pub const RECOGNIZED: [&str; 9] = [
        ID,
        ACTIVITY_DATE,
        TOTAL_STEPS,
        CALORIES,
        TOTAL_DISTANCE,
        VERY_ACTIVE_MINUTES,
        FAIRLY_ACTIVE_MINUTES,
        LIGHTLY_ACTIVE_MINUTES,
        SEDENTARY_MINUTES,
    ];
}

/// A successfully parsed row and the coercions it needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub record: ActivityRecord,
    pub warnings: Vec<FieldCoercionWarning>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub records: Vec<ActivityRecord>,
    pub warnings: Vec<FieldCoercionWarning>,
    pub rejected: Vec<ParseError>,
}

struct FieldReader<'a> {
    row: &'a RawRow,
    index: usize,
    warnings: Vec<FieldCoercionWarning>,
}

impl<'a> FieldReader<'a> {
    fn new(row: &'a RawRow, index: usize) -> Self {
        Self { row, index, warnings: Vec::new() }
    }

    fn raw(&self, column: &str) -> &'a str {
        self.row.get(column).map(|s| s.trim()).unwrap_or("")
    }

    fn warn(&mut self, column: &'static str, raw: &str, reason: CoercionReason) {
        self.warnings.push(FieldCoercionWarning {
            row: self.index,
            column,
            raw: raw.to_string(),
            reason,
        });
    }

    /// Non-negative number; blank is `0` without a warning.
    fn number(&mut self, column: &'static str) -> f64 {
        let raw = self.raw(column);
        if raw.is_empty() {
            return 0.0;
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            Ok(value) if value.is_finite() => {
                self.warn(column, raw, CoercionReason::Negative);
                0.0
            }
            _ => {
                self.warn(column, raw, CoercionReason::NotANumber);
                0.0
            }
        }
    }

    fn whole(&mut self, column: &'static str, max: f64) -> f64 {
        let raw = self.raw(column);
        let value = self.number(column);
        if value.fract() != 0.0 {
            self.warn(column, raw, CoercionReason::Fractional);
        }
        let value = value.trunc();
        if value > max {
            self.warn(column, raw, CoercionReason::OutOfRange);
            return max;
        }
        value
    }

    fn count(&mut self, column: &'static str) -> u32 {
        self.whole(column, f64::from(u32::MAX)) as u32
    }

    /// Exact for every `u64`; only non-integer text goes through the
    /// lenient numeric path.
    fn id(&mut self, column: &'static str) -> u64 {
        match self.raw(column).parse::<u64>() {
            Ok(id) => id,
            Err(_) => self.whole(column, u64::MAX as f64) as u64,
        }
    }
}

/// Parse one row. `index` is the 1-based data row number used in diagnostics.
pub fn parse_row(
    row: &RawRow,
    index: usize,
    parsing: &ParsingConfig,
) -> Result<ParsedRow, ParseError> {
    let mut fields = FieldReader::new(row, index);

    let raw_date = fields.raw(columns::ACTIVITY_DATE);
    let date = NaiveDate::parse_from_str(raw_date, &parsing.date_format).map_err(|_| {
        ParseError::InvalidDate {
            row: index,
            raw: raw_date.to_string(),
            format: parsing.date_format.clone(),
        }
    })?;

    let record = ActivityRecord {
        id: fields.id(columns::ID),
        date,
        total_steps: fields.count(columns::TOTAL_STEPS),
        calories: fields.number(columns::CALORIES),
        total_distance: fields.number(columns::TOTAL_DISTANCE),
        very_active_minutes: fields.count(columns::VERY_ACTIVE_MINUTES),
        fairly_active_minutes: fields.count(columns::FAIRLY_ACTIVE_MINUTES),
        lightly_active_minutes: fields.count(columns::LIGHTLY_ACTIVE_MINUTES),
        sedentary_minutes: fields.count(columns::SEDENTARY_MINUTES),
    };

    Ok(ParsedRow { record, warnings: fields.warnings })
}

/// Parse a sequence of rows, keeping every record that has a valid date.
pub fn parse_rows<I>(rows: I, parsing: &ParsingConfig) -> ParseOutcome
where
    I: IntoIterator<Item = RawRow>,
{
    let mut outcome = ParseOutcome::default();
    for (i, row) in rows.into_iter().enumerate() {
        match parse_row(&row, i + 1, parsing) {
            Ok(parsed) => {
                outcome.records.push(parsed.record);
                outcome.warnings.extend(parsed.warnings);
            }
            Err(e) => outcome.rejected.push(e),
        }
    }
    outcome
}

/// Pair a record with the headers. Short rows leave their trailing
/// columns absent.
fn decode_row(
    headers: &[String],
    record: &csv::ByteRecord,
    index: usize,
) -> Result<RawRow, ParseError> {
    let mut row = RawRow::with_capacity(headers.len());
    for (header, field) in headers.iter().zip(record.iter()) {
        let value = match std::str::from_utf8(field) {
            Ok(value) => value.to_string(),
            Err(e) if columns::RECOGNIZED.contains(&header.as_str()) => {
                return Err(ParseError::Malformed {
                    row: index,
                    message: format!("{} is not valid UTF-8: {}", header, e),
                });
            }
            Err(_) => String::from_utf8_lossy(field).into_owned(),
        };
        row.insert(header.clone(), value);
    }
    Ok(row)
}

/// Parse CSV text with a header row into a dataset, applying the
/// configured policy for rows that fail validation.
pub fn parse_csv(text: &str, parsing: &ParsingConfig) -> Result<Dataset, LoadError> {
    parse_csv_bytes(text.as_bytes(), parsing)
}

/// Like [`parse_csv`], for raw file contents that need not be valid UTF-8.
///
/// Undecodable bytes in an ignored column are replaced; in a recognized
/// column they make that row [`ParseError::Malformed`].
pub fn parse_csv_bytes(bytes: &[u8], parsing: &ParsingConfig) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let missing_columns: Vec<String> = columns::RECOGNIZED
        .iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing_columns.is_empty() && !headers.is_empty() {
        warn!("Input is missing columns {:?}; their values default to 0", missing_columns);
    }

    let mut outcome = ParseOutcome::default();
    for (i, result) in reader.byte_records().enumerate() {
        let index = i + 1;
        let row = result
            .map_err(|e| ParseError::Malformed { row: index, message: e.to_string() })
            .and_then(|record| decode_row(&headers, &record, index));
        match row.and_then(|row| parse_row(&row, index, parsing)) {
            Ok(parsed) => {
                outcome.records.push(parsed.record);
                outcome.warnings.extend(parsed.warnings);
            }
            Err(e) => outcome.rejected.push(e),
        }
    }

    for warning in &outcome.warnings {
        debug!("Coerced field: {}", warning);
    }
    if !outcome.warnings.is_empty() {
        warn!("{} field(s) coerced to fallback values", outcome.warnings.len());
    }

    if !outcome.rejected.is_empty() {
        match parsing.invalid_dates {
            InvalidDatePolicy::Reject => {
                let count = outcome.rejected.len();
                let first = outcome.rejected.swap_remove(0);
                return Err(LoadError::InvalidRows { count, first });
            }
            InvalidDatePolicy::Drop => {
                for rejected in &outcome.rejected {
                    debug!("Dropped row: {}", rejected);
                }
                warn!("Dropped {} row(s) that failed validation", outcome.rejected.len());
            }
        }
    }

    Ok(Dataset::from_parts(outcome, missing_columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn full_row(date: &str, steps: &str) -> RawRow {
        row(&[
            ("Id", "1503960366"),
            ("ActivityDate", date),
            ("TotalSteps", steps),
            ("Calories", "1985"),
            ("TotalDistance", "8.5"),
            ("VeryActiveMinutes", "25"),
            ("FairlyActiveMinutes", "13"),
            ("LightlyActiveMinutes", "328"),
            ("SedentaryMinutes", "728"),
        ])
    }

    #[test]
    fn test_parse_full_row() {
        let parsed = parse_row(&full_row("4/12/2016", "13162"), 1, &ParsingConfig::default())
            .unwrap();
        let record = parsed.record;

        assert_eq!(record.id, 1503960366);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2016, 4, 12).unwrap());
        assert_eq!(record.weekday(), Weekday::Tue);
        assert_eq!(record.total_steps, 13162);
        assert_eq!(record.calories, 1985.0);
        assert_eq!(record.total_distance, 8.5);
        assert_eq!(record.sedentary_minutes, 728);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_zero_padded_date() {
        let parsed = parse_row(&full_row("04/02/2016", "10"), 1, &ParsingConfig::default())
            .unwrap();
        assert_eq!(parsed.record.date, NaiveDate::from_ymd_opt(2016, 4, 2).unwrap());
    }

    #[test]
    fn test_non_numeric_field_becomes_zero_with_warning() {
        let parsed = parse_row(&full_row("4/12/2016", "lots"), 4, &ParsingConfig::default())
            .unwrap();

        assert_eq!(parsed.record.total_steps, 0);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].row, 4);
        assert_eq!(parsed.warnings[0].column, "TotalSteps");
        assert_eq!(parsed.warnings[0].reason, CoercionReason::NotANumber);
    }

    #[test]
    fn test_blank_and_absent_fields_are_silent_zero() {
        let parsed = parse_row(
            &row(&[("ActivityDate", "4/12/2016"), ("TotalSteps", "  ")]),
            1,
            &ParsingConfig::default(),
        )
        .unwrap();

        assert_eq!(parsed.record.id, 0);
        assert_eq!(parsed.record.total_steps, 0);
        assert_eq!(parsed.record.calories, 0.0);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_negative_and_fractional_counts() {
        let mut r = full_row("4/12/2016", "12.7");
        r.insert("Calories".to_string(), "-5".to_string());

        let parsed = parse_row(&r, 1, &ParsingConfig::default()).unwrap();
        assert_eq!(parsed.record.total_steps, 12);
        assert_eq!(parsed.record.calories, 0.0);

        let reasons: Vec<CoercionReason> = parsed.warnings.iter().map(|w| w.reason).collect();
        assert!(reasons.contains(&CoercionReason::Fractional));
        assert!(reasons.contains(&CoercionReason::Negative));
    }

    #[test]
    fn test_not_a_number_literals_are_rejected() {
        let parsed = parse_row(&full_row("4/12/2016", "NaN"), 1, &ParsingConfig::default())
            .unwrap();
        assert_eq!(parsed.record.total_steps, 0);
        assert_eq!(parsed.warnings[0].reason, CoercionReason::NotANumber);
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let err = parse_row(&full_row("2016-04-12", "10"), 9, &ParsingConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDate {
                row: 9,
                raw: "2016-04-12".to_string(),
                format: "%m/%d/%Y".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rows_keeps_valid_records() {
        let outcome = parse_rows(
            vec![full_row("4/12/2016", "10"), full_row("bad", "20"), full_row("4/13/2016", "x")],
            &ParsingConfig::default(),
        );

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].row(), 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].row, 3);
    }

    #[test]
    fn test_parse_csv_ignores_extra_columns() {
        let text = "Id,ActivityDate,TotalSteps,Calories,TotalDistance,VeryActiveMinutes,\
                    FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,TrackerDistance\n\
                    1,4/12/2016,1000,1800,0.7,1,2,3,4,0.7\n\
                    2,4/13/2016,3000,2000,2.1,5,6,7,8,2.1\n";

        let dataset = parse_csv(text, &ParsingConfig::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.missing_columns().is_empty());
        assert_eq!(dataset.records()[1].total_steps, 3000);
        assert_eq!(dataset.records()[1].lightly_active_minutes, 7);
    }

    #[test]
    fn test_parse_csv_reports_missing_columns() {
        let text = "Id,ActivityDate,TotalSteps\n1,4/12/2016,500\n";

        let dataset = parse_csv(text, &ParsingConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].calories, 0.0);
        assert!(dataset.missing_columns().contains(&"Calories".to_string()));
        assert_eq!(dataset.missing_columns().len(), 6);
    }

    #[test]
    fn test_parse_csv_drop_policy() {
        let text = "Id,ActivityDate,TotalSteps\n1,4/12/2016,500\n1,yesterday,700\n";

        let dataset = parse_csv(text, &ParsingConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rejected().len(), 1);
    }

    #[test]
    fn test_parse_csv_reject_policy() {
        let text = "Id,ActivityDate,TotalSteps\n1,4/12/2016,500\n1,yesterday,700\n";
        let parsing =
            ParsingConfig { invalid_dates: InvalidDatePolicy::Reject, ..Default::default() };

        match parse_csv(text, &parsing) {
            Err(LoadError::InvalidRows { count, first }) => {
                assert_eq!(count, 1);
                assert_eq!(first.row(), 2);
            }
            other => panic!("expected InvalidRows, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_short_row_defaults_trailing_fields() {
        let text = "Id,ActivityDate,TotalSteps,Calories\n1,4/12/2016,500\n";

        let dataset = parse_csv(text, &ParsingConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].total_steps, 500);
        assert_eq!(dataset.records()[0].calories, 0.0);
        assert!(dataset.warnings().is_empty());
    }

    #[test]
    fn test_ids_beyond_f64_precision_stay_distinct() {
        let text = "Id,ActivityDate\n9007199254740993,4/12/2016\n9007199254740992,4/12/2016\n";

        let dataset = parse_csv(text, &ParsingConfig::default()).unwrap();
        let ids: Vec<u64> = dataset.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9_007_199_254_740_993, 9_007_199_254_740_992]);
        assert_eq!(crate::aggregate::distinct_users(dataset.records()), 2);
        assert!(dataset.warnings().is_empty());
    }

    #[test]
    fn test_invalid_utf8_in_recognized_column_rejects_only_that_row() {
        let bytes = b"Id,ActivityDate,TotalSteps,Note\n1,4/12/2016,10,caf\xe9\n2,4/13/2016,2\xe90,ok\n";

        let dataset = parse_csv_bytes(bytes, &ParsingConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].total_steps, 10);
        match &dataset.rejected()[0] {
            ParseError::Malformed { row, message } => {
                assert_eq!(*row, 2);
                assert!(message.contains("TotalSteps"));
            }
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_empty_text() {
        let dataset = parse_csv("", &ParsingConfig::default()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_custom_date_format() {
        let parsing = ParsingConfig { date_format: "%Y-%m-%d".to_string(), ..Default::default() };
        let parsed = parse_row(&full_row("2016-04-12", "10"), 1, &parsing).unwrap();
        assert_eq!(parsed.record.weekday(), Weekday::Tue);
    }
}
