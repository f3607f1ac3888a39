use crate::error::ImportError;
use crate::input::coerce_audience;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const JOURNEY_STAGE_HEADER: &str = "Journey Stage";
pub const MESSAGE_TYPE_HEADER: &str = "Message Type";
pub const SMS_AUDIENCE_HEADER: &str = "SMS Audience Size";
pub const EMAIL_AUDIENCE_HEADER: &str = "Email Audience Size";
pub const PUSH_AUDIENCE_HEADER: &str = "Push Audience Size";

/// Column headers of the results shape, in export order.
pub const RESULTS_HEADERS: [&str; 5] = [
    JOURNEY_STAGE_HEADER,
    MESSAGE_TYPE_HEADER,
    SMS_AUDIENCE_HEADER,
    EMAIL_AUDIENCE_HEADER,
    PUSH_AUDIENCE_HEADER,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsRow {
    pub stage_name: String,
    pub message_type: String,
    pub sms_audience: u64,
    pub email_audience: u64,
    pub push_audience: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResults {
    pub rows: Vec<ResultsRow>,
    pub malformed_rows: usize,
}

/// Position of each results column in the header row.
struct ColumnMap {
    stage: usize,
    message_type: usize,
    sms: usize,
    email: usize,
    push: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim())
            .collect();
        let position = |header: &str| names.iter().position(|name| *name == header);

        let missing: Vec<String> = RESULTS_HEADERS
            .iter()
            .filter(|header| position(header).is_none())
            .map(|header| header.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingHeaders { missing });
        }

        let index = |header: &str| position(header).unwrap_or_default();
        Ok(Self {
            stage: index(JOURNEY_STAGE_HEADER),
            message_type: index(MESSAGE_TYPE_HEADER),
            sms: index(SMS_AUDIENCE_HEADER),
            email: index(EMAIL_AUDIENCE_HEADER),
            push: index(PUSH_AUDIENCE_HEADER),
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Option<ResultsRow> {
        if record.len() < RESULTS_HEADERS.len() {
            return None;
        }

        let cell = |idx: usize| record.get(idx).map(str::trim);
        let message_type = cell(self.message_type)?;
        if message_type.is_empty() {
            return None;
        }

        Some(ResultsRow {
            stage_name: cell(self.stage)?.to_string(),
            message_type: message_type.to_string(),
            sms_audience: cell(self.sms).map(coerce_audience).unwrap_or(0),
            email_audience: cell(self.email).map(coerce_audience).unwrap_or(0),
            push_audience: cell(self.push).map(coerce_audience).unwrap_or(0),
        })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Tokenizes a results CSV and validates its header row.
///
/// Matching rows against the catalog is left to the store; this only
/// rejects rows that are too short or have no message type.
pub fn parse_results(csv_text: &str) -> Result<ParsedResults, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if !is_blank(&record) {
            records.push(record);
        }
    }

    if records.len() < 2 {
        return Err(ImportError::Empty);
    }

    let columns = ColumnMap::from_headers(&records[0])?;
    let mut parsed = ParsedResults::default();

    for (line_num, record) in records.iter().enumerate().skip(1) {
        match columns.parse_row(record) {
            Some(row) => parsed.rows.push(row),
            None => {
                debug!(record = line_num + 1, "Skipping incomplete results row");
                parsed.malformed_rows += 1;
            }
        }
    }

    Ok(parsed)
}

pub fn read_results_file<P: AsRef<Path>>(path: P) -> Result<String, ImportError> {
    fs::read_to_string(&path).map_err(|source| ImportError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Journey Stage,Message Type,SMS Audience Size,Email Audience Size,Push Audience Size";

    #[test]
    fn test_parse_valid_rows() {
        let csv = format!(
            "{}\nNew Member Activation,First Visit Reminder,1000,250,0\nChurn Risk / Re-engagement,Winback - 45 Days,0,0,75\n",
            HEADER
        );

        let parsed = parse_results(&csv).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.malformed_rows, 0);
        assert_eq!(parsed.rows[0].stage_name, "New Member Activation");
        assert_eq!(parsed.rows[0].sms_audience, 1000);
        assert_eq!(parsed.rows[0].email_audience, 250);
        assert_eq!(parsed.rows[1].push_audience, 75);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let csv = format!(
            "{}\n\"Stage, One\",\"Hello, \"\"World\"\"\",5,6,7",
            HEADER
        );

        let parsed = parse_results(&csv).unwrap();
        assert_eq!(parsed.rows[0].stage_name, "Stage, One");
        assert_eq!(parsed.rows[0].message_type, "Hello, \"World\"");
        assert_eq!(parsed.rows[0].push_audience, 7);
    }

    #[test]
    fn test_headers_in_any_order() {
        let csv = "Push Audience Size,SMS Audience Size,Message Type,Email Audience Size,Journey Stage\n3,1,Birthday Message,2,Habituation & Repeat Visits";

        let parsed = parse_results(csv).unwrap();
        let row = &parsed.rows[0];
        assert_eq!(row.stage_name, "Habituation & Repeat Visits");
        assert_eq!(row.message_type, "Birthday Message");
        assert_eq!(
            (row.sms_audience, row.email_audience, row.push_audience),
            (1, 2, 3)
        );
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let csv = "Journey Stage,Message Type,SMS Audience Size,Email Audience Size\nA,B,1,2";

        match parse_results(csv) {
            Err(ImportError::MissingHeaders { missing }) => {
                assert_eq!(missing, vec!["Push Audience Size".to_string()]);
            }
            other => panic!("expected missing headers, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(parse_results(""), Err(ImportError::Empty)));
        assert!(matches!(parse_results("\n\n  \n"), Err(ImportError::Empty)));
        assert!(matches!(parse_results(HEADER), Err(ImportError::Empty)));
    }

    #[test]
    fn test_short_and_nameless_rows_are_skipped() {
        let csv = format!(
            "{}\nOnly,Three,Cells\nStage,,1,2,3\n\nStage,Type,x,-4,12.5\n",
            HEADER
        );

        let parsed = parse_results(&csv).unwrap();
        assert_eq!(parsed.malformed_rows, 2);
        assert_eq!(parsed.rows.len(), 1);
        let row = &parsed.rows[0];
        assert_eq!(
            (row.sms_audience, row.email_audience, row.push_audience),
            (0, 0, 12)
        );
    }

    #[test]
    fn test_byte_order_mark_in_header() {
        let csv = format!("\u{feff}{}\nA,B,1,2,3", HEADER);
        assert_eq!(parse_results(&csv).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_read_results_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(format!("{}\nA,B,1,2,3", HEADER).as_bytes())
            .unwrap();

        let text = read_results_file(temp_file.path()).unwrap();
        assert_eq!(parse_results(&text).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_results_file("/no/such/results.csv"),
            Err(ImportError::Io { .. })
        ));
    }
}
