use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::cli::GlobalArgs;
use crate::config::{Config, DEFAULT_TZ};
use crate::domain::{git::GitLog, hours};
use crate::presentation::histogram::{self, HourReport};

/// Histogram of one author's commits by local hour.
#[derive(Debug, Clone, Args)]
pub struct Hours {
    /// 📁 Path of the git repository
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// ✉️ Author to match (substring of name or email, as `git log --author`)
    #[arg(short, long, visible_alias = "author")]
    pub user: String,

    /// 🌏 IANA timezone the hours are shown in
    #[arg(short, long, env = "GITCLOCK_TZ", default_value = DEFAULT_TZ)]
    pub tz: String,

    /// Print the counts as JSON instead of a histogram
    #[arg(long)]
    pub json: bool,
}

impl super::Runnable for Hours {
    fn run(self, _g: &GlobalArgs) -> Result<()> {
        let cfg = Config::from_args(&self)?;
        info!("counting commits by {:?} in {} ({})", cfg.author, cfg.repo.display(), cfg.tz.name());

        let log = GitLog::spawn(&cfg.repo, &cfg.author).context("git command failed")?;
        let tally = hours::tally(log, &cfg.tz).context("reading git log failed")?;
        info!("{} commits counted, {} lines skipped", tally.counted(), tally.skipped);

        let mut out = std::io::stdout().lock();
        if cfg.json {
            let report = HourReport::new(&cfg, &tally);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            out.write_all(histogram::render(&tally.workweek, &tally.weekend).as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }
}
