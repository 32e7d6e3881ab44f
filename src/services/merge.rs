//! Merge Service
//!
//! Ordered queue of GPX files to merge, with drag-and-drop style reordering,
//! and the merge call itself. The backend does the merging.

use std::path::Path;

use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::{merged_filename, GpxFileContent, MergeOptions, MergeRequest};
use crate::validation::forms::validate_merge;
use crate::validation::{file_extension, format_validation_error, validate_gpx_file, LocalFile};

/// File waiting in the merge queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedFile {
    pub id: String,
    pub filename: String,
    pub content: String,
}

/// Files in merge order
#[derive(Debug, Clone, Default)]
pub struct MergeQueue {
    files: Vec<QueuedFile>,
    dragged: Option<usize>,
}

impl MergeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[QueuedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append a file; returns its queue id
    pub fn push(&mut self, filename: impl Into<String>, content: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.files.push(QueuedFile {
            id: id.clone(),
            filename: filename.into(),
            content: content.into(),
        });
        id
    }

    /// Append dropped files, silently skipping anything that is not `.gpx`
    pub fn push_dropped<I>(&mut self, dropped: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let before = self.files.len();
        for (filename, content) in dropped {
            if file_extension(&filename) == ".gpx" {
                self.push(filename, content);
            }
        }
        self.files.len() - before
    }

    /// Validate a local file and queue its content
    pub fn push_local(&mut self, path: &Path) -> AppResult<String> {
        let file = LocalFile::open(path)?;
        let validation = validate_gpx_file(&file);
        if !validation.valid {
            return Err(AppError::InvalidFile(format!(
                "{}: {}",
                path.display(),
                format_validation_error(&validation)
            )));
        }

        let content = String::from_utf8_lossy(&file.read_all()?).into_owned();
        Ok(self.push(file_name_of(path), content))
    }

    pub fn remove(&mut self, id: &str) -> Option<QueuedFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        self.dragged = None;
        Some(self.files.remove(index))
    }

    /// Move the file at `from` so that it ends up at `to`
    pub fn move_file(&mut self, from: usize, to: usize) -> bool {
        if from >= self.files.len() || to >= self.files.len() {
            return false;
        }
        let file = self.files.remove(from);
        self.files.insert(to, file);
        true
    }

    pub fn drag_start(&mut self, index: usize) {
        if index < self.files.len() {
            self.dragged = Some(index);
        }
    }

    /// The dragged file follows the pointer: it moves to `index` right away
    pub fn drag_over(&mut self, index: usize) {
        if let Some(dragged) = self.dragged {
            if dragged != index && self.move_file(dragged, index) {
                self.dragged = Some(index);
            }
        }
    }

    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    /// Validated request in queue order
    pub fn to_request(&self, options: MergeOptions, merged_name: &str) -> AppResult<MergeRequest> {
        let name = validate_merge(self.files.len(), merged_name)?;

        Ok(MergeRequest {
            files: self
                .files
                .iter()
                .map(|f| GpxFileContent {
                    filename: f.filename.clone(),
                    content: f.content.clone(),
                })
                .collect(),
            options,
            merged_track_name: name,
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Merged track ready to be written
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Download name, e.g. `Tour_du_Mont_Blanc.gpx`
    pub filename: String,
    pub gpx: String,
    pub warnings: Vec<String>,
}

pub async fn merge(
    api: &ApiClient,
    queue: &MergeQueue,
    options: MergeOptions,
    merged_name: &str,
) -> AppResult<MergeOutcome> {
    let request = queue.to_request(options, merged_name)?;
    tracing::info!(
        files = request.files.len(),
        gap_threshold_seconds = request.options.gap_threshold_seconds,
        "Merging GPX files"
    );

    let response = api.merge_files(&request).await?;
    if response.merged_gpx.is_empty() {
        return Err(AppError::UploadFailed("The server returned an empty merge.".to_string()));
    }

    Ok(MergeOutcome {
        filename: merged_filename(&request.merged_track_name),
        gpx: response.merged_gpx,
        warnings: response.warnings,
    })
}
