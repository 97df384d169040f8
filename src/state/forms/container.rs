//! Form container: file selection, loading and the loaded form

use super::form_state::LoadedForm;
use super::loader::{load, LoadError, PARSE_ERROR_MESSAGE};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Shown when a selected path is not a `.json` file
pub const WRONG_EXTENSION_MESSAGE: &str = "Kun .json-filer kan velges.";

/// Identifies one file selection; only the latest one is applied
pub type Generation = u64;

/// Completion of a spawned file read
#[derive(Debug)]
pub struct FileRead {
    pub generation: Generation,
    pub path: PathBuf,
    pub result: io::Result<Vec<u8>>,
}

/// Container state
#[derive(Debug, Default)]
pub enum ContainerState {
    /// Upload prompt, nothing selected yet
    #[default]
    NoFileLoaded,
    /// Upload prompt with the message of the last failure; accepts a new file
    FileLoadFailed { error: String },
    FormLoaded(LoadedForm),
}

/// Owns the upload prompt and, once loaded, the form
#[derive(Debug, Default)]
pub struct FormContainer {
    pub state: ContainerState,
    generation: Generation,
    pending: Option<Generation>,
}

/// True if the path names a `.json` file
pub fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl FormContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the upload prompt is shown
    pub fn accepts_file(&self) -> bool {
        !matches!(self.state, ContainerState::FormLoaded(_))
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Message to show under the upload prompt
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ContainerState::FileLoadFailed { error } => Some(error),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&LoadedForm> {
        match &self.state {
            ContainerState::FormLoaded(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut LoadedForm> {
        match &mut self.state {
            ContainerState::FormLoaded(form) => Some(form),
            _ => None,
        }
    }

    /// Start a new selection, superseding any read still in flight
    pub fn begin_read(&mut self) -> Generation {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.generation
    }

    /// Select a file and read it on the runtime.
    ///
    /// The outcome arrives on `tx` and must be passed to [`Self::finish_read`].
    pub fn select_file(&mut self, path: PathBuf, tx: UnboundedSender<FileRead>) -> Option<Generation> {
        if !self.accepts_file() {
            return None;
        }
        if !is_json_path(&path) {
            tracing::debug!("Refusing non-json path {}", path.display());
            // A refused selection still supersedes any read in flight
            self.pending = None;
            self.state = ContainerState::FileLoadFailed {
                error: WRONG_EXTENSION_MESSAGE.to_string(),
            };
            return None;
        }

        let generation = self.begin_read();
        tracing::debug!(generation, "Reading {}", path.display());
        tokio::spawn(async move {
            let result = tokio::fs::read(&path).await;
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(FileRead {
                generation,
                path,
                result,
            });
        });
        Some(generation)
    }

    /// Apply a finished read. Returns false if it was superseded and dropped.
    pub fn finish_read(&mut self, read: FileRead) -> bool {
        if self.pending != Some(read.generation) || !self.accepts_file() {
            tracing::debug!(
                generation = read.generation,
                "Discarding stale read of {}",
                read.path.display()
            );
            return false;
        }
        self.pending = None;

        match read.result {
            Ok(bytes) => {
                // load() has already logged any failure
                let _ = self.load_bytes(&bytes);
            }
            Err(err) => {
                tracing::warn!("Could not read {}: {err}", read.path.display());
                self.state = ContainerState::FileLoadFailed {
                    error: PARSE_ERROR_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Load file contents, moving to `FormLoaded` or `FileLoadFailed`
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        match load(bytes) {
            Ok(definition) => {
                self.state = ContainerState::FormLoaded(LoadedForm::new(definition));
                Ok(())
            }
            Err(err) => {
                self.state = ContainerState::FileLoadFailed {
                    error: err.to_string(),
                };
                Err(err)
            }
        }
    }
}
