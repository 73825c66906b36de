use chrono::{DateTime, FixedOffset};

use crate::error::RecordError;

/// Layout of the `%ai` date as emitted by `git log`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One `<hash> <date> <time> <offset>` line from the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord<'a> {
    pub hash: &'a str,
    pub timestamp: DateTime<FixedOffset>,
}

impl<'a> CommitRecord<'a> {
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(RecordError::TooFewFields(fields.len()));
        }
        let (hash, date, time, offset) = (fields[0], fields[1], fields[2], fields[3]);

        if !is_offset(offset) {
            return Err(RecordError::Offset(offset.to_string()));
        }

        let text = format!("{date} {time} {offset}");
        let timestamp = DateTime::parse_from_str(&text, DATE_FORMAT)
            .map_err(|source| RecordError::Timestamp { text, source })?;

        Ok(Self { hash, timestamp })
    }
}

/// `+HHMM` or `-HHMM`, nothing else.
fn is_offset(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5 && matches!(b[0], b'+' | b'-') && b[1..].iter().all(u8::is_ascii_digit)
}
