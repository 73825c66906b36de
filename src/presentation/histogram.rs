use std::fmt::Write as _;

use serde::Serialize;

use crate::config::Config;
use crate::domain::hours::{HourBuckets, HourTally, HOURS};

/// Widest bar drawn for the busiest hour.
pub const BAR_WIDTH: usize = 25;

/// Number of `*` for `count` when the busiest bucket holds `max`.
/// Truncates, never rounds; a zero `max` draws nothing.
pub fn bar_width(count: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (count as f64 / max as f64 * BAR_WIDTH as f64) as usize
}

fn bar(count: usize, max: usize) -> String {
    "*".repeat(bar_width(count, max))
}

/// Share of `part` in `total` as a percentage; 0 when there is nothing to share.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub workweek: usize,
    pub weekend: usize,
    pub total: usize,
    pub workweek_pct: f64,
    pub weekend_pct: f64,
}

impl Totals {
    pub fn of(workweek: &HourBuckets, weekend: &HourBuckets) -> Self {
        let (workweek, weekend) = (workweek.total(), weekend.total());
        let total = workweek + weekend;
        Self {
            workweek,
            weekend,
            total,
            workweek_pct: percent(workweek, total),
            weekend_pct: percent(weekend, total),
        }
    }
}

/// Text histogram: header, one row per hour, blank line, totals.
pub fn render(workweek: &HourBuckets, weekend: &HourBuckets) -> String {
    let max = workweek.max().max(weekend.max());
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<6} {:>6} {:<30} {:>6} {:<30}",
        "hour", "", "Monday to Friday", "", "Saturday and Sunday"
    );
    for hour in 0..HOURS {
        let (w, e) = (workweek.get(hour), weekend.get(hour));
        let _ = writeln!(
            out,
            "{:02} {:>6} {:<30} {:>6} {:<30}",
            hour,
            w,
            bar(w, max),
            e,
            bar(e, max)
        );
    }

    let t = Totals::of(workweek, weekend);
    let _ = writeln!(
        out,
        "\nTotal: {:>6} ({:.1}%) {:>6} ({:.1}%)",
        t.workweek, t.workweek_pct, t.weekend, t.weekend_pct
    );
    out
}

#[derive(Debug, Serialize)]
pub struct HourRow {
    pub hour: usize,
    pub workweek: usize,
    pub weekend: usize,
}

/// Machine-readable form of the same report.
#[derive(Debug, Serialize)]
pub struct HourReport<'a> {
    pub repository: String,
    pub author: &'a str,
    pub timezone: &'a str,
    pub hours: Vec<HourRow>,
    pub totals: Totals,
    pub skipped: usize,
}

impl<'a> HourReport<'a> {
    pub fn new(cfg: &'a Config, tally: &HourTally) -> Self {
        let hours = (0..HOURS)
            .map(|hour| HourRow {
                hour,
                workweek: tally.workweek.get(hour),
                weekend: tally.weekend.get(hour),
            })
            .collect();
        Self {
            repository: cfg.repo.display().to_string(),
            author: &cfg.author,
            timezone: cfg.tz.name(),
            hours,
            totals: Totals::of(&tally.workweek, &tally.weekend),
            skipped: tally.skipped,
        }
    }
}
