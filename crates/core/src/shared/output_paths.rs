use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::constants::DEFAULT_FILENAME_PATTERN;
use super::time_window::TimeWindow;

/// Derives output file locations from the input path.
///
/// The pattern understands `{stem}`, `{task}` and `{ext}`. When a time
/// window is set its suffix is appended to the stem so partial runs never
/// overwrite full ones.
#[derive(Clone, Debug)]
pub struct OutputNaming {
    output_dir: Option<PathBuf>,
    pattern: String,
    window: Option<TimeWindow>,
}

impl OutputNaming {
    pub fn new(output_dir: Option<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            output_dir,
            pattern: pattern.into(),
            window: None,
        }
    }

    pub fn with_window(mut self, window: Option<TimeWindow>) -> Self {
        self.window = window;
        self
    }

    pub fn file_name(&self, input: &Path, task: &str, ext: &str) -> String {
        let mut stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output")
            .to_string();
        if let Some(window) = &self.window {
            stem.push_str(&window.suffix());
        }
        self.pattern
            .replace("{stem}", &stem)
            .replace("{task}", task)
            .replace("{ext}", ext)
    }

    /// Full output path; the target directory is created if missing.
    pub fn path_for(&self, input: &Path, task: &str, ext: &str) -> io::Result<PathBuf> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir.join(self.file_name(input, task, ext)))
    }
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self::new(None, DEFAULT_FILENAME_PATTERN)
    }
}
