use std::path::{Path, PathBuf};

use chrono_tz::Tz;

use crate::commands::Hours;
use crate::domain::git;
use crate::error::ConfigError;

pub const DEFAULT_TZ: &str = "Asia/Tokyo";

/// Settings for one run. Built once from the command line, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the repository work tree.
    pub repo: PathBuf,
    /// Substring matched against the commit author by `git log --author`.
    pub author: String,
    pub tz: Tz,
    pub json: bool,
}

impl Config {
    pub fn from_args(args: &Hours) -> Result<Self, ConfigError> {
        if args.user.is_empty() {
            return Err(ConfigError::EmptyAuthor);
        }
        let tz = parse_tz(&args.tz)?;
        let dir = absolute(&args.dir)?;
        let repo = git::discover(&dir)?;

        Ok(Self {
            repo,
            author: args.user.clone(),
            tz,
            json: args.json,
        })
    }
}

/// Resolve an IANA zone name; empty means the default zone.
pub fn parse_tz(name: &str) -> Result<Tz, ConfigError> {
    let name = if name.is_empty() { DEFAULT_TZ } else { name };
    name.parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

/// Anchor `dir` at the current directory; empty means `.`.
pub fn absolute(dir: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .map_err(|source| ConfigError::Directory {
            path: dir.to_path_buf(),
            source,
        })
}
