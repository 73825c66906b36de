use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use chrono_tz::Tz;
use tracing::{trace, warn};

use super::record::CommitRecord;
use crate::error::{GitError, RecordError};

pub const HOURS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Workweek,
    Weekend,
}

impl DayClass {
    pub fn of(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Workweek,
        }
    }
}

/// Commit counts indexed by local hour of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourBuckets([usize; HOURS]);

impl HourBuckets {
    pub fn get(&self, hour: usize) -> usize {
        self.0.get(hour).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, hour: u32) {
        self.0[hour as usize] += 1;
    }

    pub fn max(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl From<[usize; HOURS]> for HourBuckets {
    fn from(counts: [usize; HOURS]) -> Self {
        Self(counts)
    }
}

/// Workweek and weekend tables for one author, built in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourTally {
    pub workweek: HourBuckets,
    pub weekend: HourBuckets,
    /// Lines dropped because they were short or unparseable.
    pub skipped: usize,
}

impl HourTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one instant in `tz` and count it.
    pub fn record(&mut self, at: &DateTime<FixedOffset>, tz: &Tz) -> (DayClass, u32) {
        let local = at.with_timezone(tz);
        let class = DayClass::of(local.weekday());
        let hour = local.hour();
        match class {
            DayClass::Workweek => self.workweek.bump(hour),
            DayClass::Weekend => self.weekend.bump(hour),
        }
        (class, hour)
    }

    /// Parse and count one log line. Bad lines are counted as skipped and
    /// handed back to the caller.
    pub fn ingest(&mut self, line: &str, tz: &Tz) -> Result<(), RecordError> {
        match CommitRecord::parse(line) {
            Ok(rec) => {
                let (class, hour) = self.record(&rec.timestamp, tz);
                trace!(hash = rec.hash, ?class, hour, "counted commit");
                Ok(())
            }
            Err(e) => {
                self.skipped += 1;
                Err(e)
            }
        }
    }

    pub fn counted(&self) -> usize {
        self.workweek.total() + self.weekend.total()
    }
}

/// Drain the extractor's lines into a tally. Per-line problems are logged and
/// skipped; a stream error aborts.
pub fn tally<I>(lines: I, tz: &Tz) -> Result<HourTally, GitError>
where
    I: IntoIterator<Item = Result<String, GitError>>,
{
    let mut out = HourTally::new();
    for line in lines {
        let line = line?;
        match out.ingest(&line, tz) {
            Ok(()) => {}
            Err(e @ RecordError::TooFewFields(_)) => trace!("skipping line {line:?}: {e}"),
            Err(e) => warn!("date parse error (line: {line}): {e}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<Result<String, GitError>> {
        raw.iter().map(|s| Ok(s.to_string())).collect()
    }

    #[test]
    fn tokyo_scenario() {
        let input = lines(&[
            "abc123 2024-08-12 10:00:00 +0900",
            "def456 2024-08-17 15:00:00 +0900",
            "ghi789 2024-08-17 15:30:00 +0900",
        ]);
        let t = tally(input, &chrono_tz::Asia::Tokyo).unwrap();

        let mut workweek = [0; HOURS];
        workweek[10] = 1;
        let mut weekend = [0; HOURS];
        weekend[15] = 2;
        assert_eq!(t.workweek, HourBuckets::from(workweek));
        assert_eq!(t.weekend, HourBuckets::from(weekend));
        assert_eq!(t.counted(), 3);
        assert_eq!(t.skipped, 0);
    }

    #[test]
    fn classification_follows_local_calendar() {
        let at = DateTime::parse_from_str("2024-08-17 23:30:00 +0000", "%Y-%m-%d %H:%M:%S %z").unwrap();

        // Saturday UTC becomes Sunday 08:30 in Tokyo.
        let mut t = HourTally::new();
        assert_eq!(t.record(&at, &chrono_tz::Asia::Tokyo), (DayClass::Weekend, 8));

        // 03:00 Saturday UTC is still Friday evening in Los Angeles.
        let early = DateTime::parse_from_str("2024-08-17 03:00:00 +0000", "%Y-%m-%d %H:%M:%S %z").unwrap();
        assert_eq!(
            t.record(&early, &chrono_tz::America::Los_Angeles),
            (DayClass::Workweek, 20)
        );
        assert_eq!(t.weekend.get(8), 1);
        assert_eq!(t.workweek.get(20), 1);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let input = lines(&[
            "not-a-valid-line",
            "",
            "abc123 2024-08-12 10:00:00 +0900",
            "bad 2024-02-30 10:00:00 +0900",
            "odd 2024-08-12 10:00:00 +09:00",
        ]);
        let t = tally(input, &chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(t.counted(), 1);
        assert_eq!(t.skipped, 4);
        assert_eq!(t.workweek.get(10), 1);
    }

    #[test]
    fn counts_plus_skips_equal_lines() {
        let raw = [
            "a 2024-01-01 00:00:00 +0000",
            "b 2024-01-06 23:59:59 +0000",
            "junk",
            "c 2024-01-07 12:00:00 -0500",
            "d 2024-01-08 12:00:00 +0530",
        ];
        let t = tally(lines(&raw), &chrono_tz::Tz::UTC).unwrap();
        assert_eq!(t.counted() + t.skipped, raw.len());
        assert_eq!(t.counted(), 4);
        // Sunday 17:00 UTC
        assert_eq!(t.weekend.get(17), 1);
        // Monday 06:30 UTC
        assert_eq!(t.workweek.get(6), 1);
    }

    #[test]
    fn stream_error_aborts() {
        let input = vec![
            Ok("abc123 2024-08-12 10:00:00 +0900".to_string()),
            Err(GitError::Execution { code: Some(128), stderr: "fatal".into() }),
        ];
        let err = tally(input, &chrono_tz::Asia::Tokyo).unwrap_err();
        assert!(matches!(err, GitError::Execution { code: Some(128), .. }));
    }

    #[test]
    fn read_error_aborts() {
        let input = vec![
            Ok("abc123 2024-08-12 10:00:00 +0900".to_string()),
            Err(GitError::Read(std::io::Error::other("pipe closed"))),
            Ok("def456 2024-08-17 15:00:00 +0900".to_string()),
        ];
        let err = tally(input, &chrono_tz::Asia::Tokyo).unwrap_err();
        assert!(matches!(err, GitError::Read(ref e) if e.to_string() == "pipe closed"));
    }

    #[test]
    #[should_panic]
    fn out_of_range_hour_is_not_wrapped() {
        HourBuckets::default().bump(24);
    }

    #[test]
    fn day_class() {
        assert_eq!(DayClass::of(Weekday::Fri), DayClass::Workweek);
        assert_eq!(DayClass::of(Weekday::Mon), DayClass::Workweek);
        assert_eq!(DayClass::of(Weekday::Sat), DayClass::Weekend);
        assert_eq!(DayClass::of(Weekday::Sun), DayClass::Weekend);
    }
}
