//! Append-only audit log, one file per process run.
//!
//! Write-only trail of the conversation (`SYSTEM:`/`YOU:`/`AI:`/`ERROR:`
//! line prefixes); never read back programmatically. Write failures
//! degrade to a warning so logging can never take down the chat loop.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Open a log named by the process start time, e.g.
    /// `chat_20260826_143015.log`, under `dir`.
    pub fn create(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!("failed to create log directory {}: {e}", dir.display());
        }
        let name = chrono::Local::now()
            .format("chat_%Y%m%d_%H%M%S.log")
            .to_string();
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn system(&self, text: &str) {
        self.line("SYSTEM", text);
    }

    pub fn you(&self, text: &str) {
        self.line("YOU", text);
    }

    pub fn ai(&self, text: &str) {
        self.line("AI", text);
    }

    pub fn error(&self, text: &str) {
        self.line("ERROR", text);
    }

    fn line(&self, prefix: &str, text: &str) {
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{prefix}: {text}"));
        if let Err(e) = result {
            warn!("audit log write failed for {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lines_are_appended_with_prefixes_in_order() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::create(dir.path());

        log.system("app started");
        log.you("Hi");
        log.ai("Hello!");
        log.error("rate limited");

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "SYSTEM: app started\nYOU: Hi\nAI: Hello!\nERROR: rate limited\n"
        );
    }

    #[test]
    fn file_name_carries_the_run_timestamp() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::create(dir.path());
        let name = log.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("chat_"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn write_failure_does_not_panic() {
        // Point the log at a path whose parent is a file.
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let log = AuditLog::create(blocker.join("logs"));
        log.system("dropped");
    }
}
