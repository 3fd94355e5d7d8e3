use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use triage_engine::AtomicFileWriter;
use triage_logging::{triage_error, triage_info, triage_warn};

const DRAFT_FILENAME: &str = "draft.ron";

/// On-disk draft document. `saved_at` is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedDraft {
    text: String,
    saved_at: String,
}

/// Best-effort draft persistence. Every operation logs and swallows its
/// own failures; losing a draft must never take the form down.
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Draft location under the platform data directory, falling back to a
    /// dot-directory in the current working directory.
    pub fn at_default_location() -> Self {
        let dir = dirs::data_dir()
            .map(|base| base.join("inbox-triage"))
            .unwrap_or_else(|| PathBuf::from(".inbox-triage"));
        Self::new(dir)
    }

    /// Loads the persisted draft text, if any usable draft exists.
    pub fn load(&self) -> Option<String> {
        let path = self.dir.join(DRAFT_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return None;
            }
            Err(err) => {
                triage_warn!("Failed to read draft from {:?}: {}", path, err);
                return None;
            }
        };

        let draft: PersistedDraft = match ron::from_str(&content) {
            Ok(draft) => draft,
            Err(err) => {
                triage_warn!("Failed to parse draft from {:?}: {}", path, err);
                return None;
            }
        };

        if draft.text.is_empty() {
            return None;
        }

        triage_info!("Restored draft from {:?} (saved {})", path, draft.saved_at);
        Some(draft.text)
    }

    /// Persists the composer text, replacing any previous draft.
    pub fn save(&self, text: &str) {
        let draft = PersistedDraft {
            text: text.to_owned(),
            saved_at: Utc::now().to_rfc3339(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&draft, pretty) {
            Ok(text) => text,
            Err(err) => {
                triage_error!("Failed to serialize draft: {}", err);
                return;
            }
        };

        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.write(DRAFT_FILENAME, &content) {
            triage_error!("Failed to write draft to {:?}: {}", self.dir, err);
        }
    }

    /// Removes the persisted draft, if present.
    pub fn clear(&self) {
        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.remove(DRAFT_FILENAME) {
            triage_warn!("Failed to remove draft in {:?}: {}", self.dir, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::new(dir.path().to_path_buf());

        store.save("unfinished reply about the invoice");

        assert_eq!(
            store.load().as_deref(),
            Some("unfinished reply about the invoice")
        );
    }

    #[test]
    fn load_without_a_draft_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::new(dir.path().to_path_buf());

        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_removes_the_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::new(dir.path().to_path_buf());
        store.save("text");

        store.clear();

        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_draft_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path()).expect("mkdir");
        fs::write(dir.path().join(DRAFT_FILENAME), "not ron at all {{{").expect("write");
        let store = DraftStore::new(dir.path().to_path_buf());

        assert_eq!(store.load(), None);
    }

    #[test]
    fn empty_draft_text_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::new(dir.path().to_path_buf());
        store.save("");

        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_overwrites_the_previous_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DraftStore::new(dir.path().to_path_buf());

        store.save("first");
        store.save("second");

        assert_eq!(store.load().as_deref(), Some("second"));
    }
}
