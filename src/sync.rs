// Sync loop: walks the configured examples in order and pushes each one to
// its gist. A problem with one example is logged and recorded in the report;
// it never stops the remaining examples from being attempted.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::api::{GistClient, GistError};
use crate::config::{Config, Item, EXAMPLES_DIR};

/// What happened to a single example during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    /// No gist id configured; nothing was sent.
    SkippedNoId,
    /// The example file does not exist; nothing was sent.
    SkippedMissingFile(PathBuf),
    /// The file could not be read or the update request failed.
    Failed(String),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::SkippedNoId | Outcome::SkippedMissingFile(_))
    }
}

/// Per-example outcomes of one run, in processing order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub entries: Vec<(String, Outcome)>,
}

impl SyncReport {
    pub fn updated(&self) -> usize {
        self.count(|o| *o == Outcome::Updated)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::is_skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Outcome recorded for the example called `name`, if it was processed.
    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} skipped, {} failed",
            self.updated(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Push every example in `config` to its gist, one after the other.
///
/// `root` is the repository root holding `docs_site/static/examples`.
/// Response bodies of rejected updates are written to `out`.
pub fn sync_all(
    client: &GistClient,
    config: &Config,
    root: &Path,
    out: &mut dyn Write,
) -> SyncReport {
    let examples_dir = root.join(EXAMPLES_DIR);
    if !examples_dir.is_dir() {
        warn!(
            "Examples directory {} does not exist; pass --root or set GIST_SYNC_ROOT to the repository root",
            examples_dir.display()
        );
    }

    let mut report = SyncReport::default();
    for item in &config.items {
        let outcome = sync_item(client, item, root, out);
        report.entries.push((item.name.clone(), outcome));
    }
    info!("Gist sync finished: {}", report);
    report
}

/// Load one example from disk and push it to its gist.
pub fn sync_item(client: &GistClient, item: &Item, root: &Path, out: &mut dyn Write) -> Outcome {
    let Some(gist_id) = item.gist_id.as_deref() else {
        info!("Skipping {}: No GIST_ID provided.", item.name);
        return Outcome::SkippedNoId;
    };

    let path = item.file_path(root);
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Outcome::SkippedMissingFile(path);
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            error!(
                "Error updating {}: failed to read {}: {}",
                item.name,
                path.display(),
                e
            );
            return Outcome::Failed(e.to_string());
        }
    };

    match client.update_gist(gist_id, &content) {
        Ok(()) => {
            info!("Successfully updated Gist for {} ({}).", item.name, gist_id);
            Outcome::Updated
        }
        Err(err) => {
            match &err {
                GistError::Status { status, body } => {
                    error!("Failed to update Gist for {}. Status: {}", item.name, status);
                    if let Err(e) = out.write_all(body).and_then(|_| out.flush()) {
                        warn!("Could not write response body: {}", e);
                    }
                }
                GistError::Transport(e) => error!("Request error: {}", e),
                GistError::Encode(e) => {
                    error!("Failed to encode request for {}: {}", item.name, e)
                }
            }
            error!("Error updating {}: {}", item.name, err);
            Outcome::Failed(err.to_string())
        }
    }
}
