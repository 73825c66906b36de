use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

use git2::{ErrorCode, Repository};
use tracing::{debug, debug_span};

use crate::error::{ConfigError, GitError};

/// `--format` string producing `<hash> <YYYY-MM-DD> <HH:MM:SS> <±HHMM>`.
pub const LOG_FORMAT: &str = "%H %ai";

/// Locate the repository containing `path`, failing early when there is none.
///
/// libgit2 refuses some repositories the `git` binary reads fine (sha256
/// object format, newer extensions). Those are passed through unchanged and
/// `git log` gets the final say.
pub fn discover(path: &Path) -> Result<PathBuf, ConfigError> {
    match Repository::discover(path) {
        Ok(repo) => Ok(repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf()),
        Err(source) if source.code() == ErrorCode::NotFound => Err(ConfigError::NotARepository {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) => {
            debug!("libgit2 cannot open {}: {e}; deferring to git", path.display());
            Ok(path.to_path_buf())
        }
    }
}

/// Build `git --no-pager -C <dir> log --author=<author> --format=%H %ai`.
pub fn log_command(dir: &Path, author: &str) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("--no-pager")
        .arg("-C")
        .arg(dir)
        .arg("log")
        .arg(format!("--author={author}"))
        .arg(format!("--format={LOG_FORMAT}"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Lines streamed from a running `git log`.
///
/// The iterator is single-use. Once stdout is exhausted the child is reaped
/// and a non-zero exit is yielded as the final item. Stderr is drained on its
/// own thread so a chatty child cannot stall stdout.
pub struct GitLog {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    stderr: Option<JoinHandle<std::io::Result<String>>>,
    done: bool,
}

impl GitLog {
    pub fn spawn(dir: &Path, author: &str) -> Result<Self, GitError> {
        Self::from_command(log_command(dir, author))
    }

    pub fn from_command(mut cmd: Command) -> Result<Self, GitError> {
        let _span = debug_span!("git_log").entered();
        debug!("{cmd:?}");

        let mut child = cmd.spawn().map_err(GitError::Launch)?;
        let stdout = match child.stdout.take() {
            Some(out) => out,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GitError::Launch(std::io::Error::other("stdout was not captured")));
            }
        };

        let stderr = child.stderr.take().map(drain);

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
            stderr,
            done: false,
        })
    }

    fn finish(&mut self) -> Result<(), GitError> {
        let stderr = match self.stderr.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| GitError::Read(std::io::Error::other("stderr reader panicked")))?
                .map_err(GitError::Read)?,
            None => String::new(),
        };
        let status = self.child.wait().map_err(GitError::Read)?;
        debug!("git exited with {status}");
        if status.success() {
            Ok(())
        } else {
            Err(GitError::Execution {
                code: status.code(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

fn drain(mut err: ChildStderr) -> JoinHandle<std::io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        err.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

impl Iterator for GitLog {
    type Item = Result<String, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(GitError::Read(e)))
            }
            None => {
                self.done = true;
                self.finish().err().map(Err)
            }
        }
    }
}

impl Drop for GitLog {
    fn drop(&mut self) {
        // No-ops once the child has been reaped.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
