use std::path::{Path, PathBuf};

use thiserror::Error;

use super::constants::DEFAULT_INPUT_FORMATS;

#[derive(Error, Debug)]
pub enum MediaFormatError {
    #[error("unsupported input format '{extension}' for {path} (supported: {supported})")]
    Unsupported {
        path: PathBuf,
        extension: String,
        supported: String,
    },
}

/// Set of accepted input container extensions, compared case-insensitively.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaFormats {
    extensions: Vec<String>,
}

impl MediaFormats {
    /// Parses a comma-separated list such as `"mp4, MOV,mkv"`.
    pub fn parse(list: &str) -> Self {
        Self {
            extensions: list
                .split(',')
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Rejects a path before any processing starts.
    pub fn validate(&self, path: &Path) -> Result<(), MediaFormatError> {
        if self.is_supported(path) {
            return Ok(());
        }
        Err(MediaFormatError::Unsupported {
            path: path.to_path_buf(),
            extension: extension_of(path).unwrap_or_default(),
            supported: self.extensions.join(","),
        })
    }
}

impl Default for MediaFormats {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_INPUT_FORMATS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
