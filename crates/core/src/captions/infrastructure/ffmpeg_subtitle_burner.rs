use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::captions::domain::subtitle_burner::SubtitleBurner;
use crate::shared::constants::DEFAULT_BURN_CRF;

/// libass style: small white text on a translucent box near the bottom.
pub const DEFAULT_SUBTITLE_STYLE: &str = "FontSize=14,PrimaryColour=&Hffffff,BackColour=&H80000000,OutlineColour=&H0,BorderStyle=3,MarginV=30";

/// Burns subtitles by invoking the `ffmpeg` binary with the `subtitles`
/// filter, re-encoding video as H.264 and audio as AAC.
pub struct FfmpegSubtitleBurner {
    binary: OsString,
    crf: u32,
    style: String,
}

impl FfmpegSubtitleBurner {
    pub fn new() -> Self {
        Self {
            binary: OsString::from("ffmpeg"),
            crf: DEFAULT_BURN_CRF,
            style: DEFAULT_SUBTITLE_STYLE.to_string(),
        }
    }

    pub fn with_crf(mut self, crf: u32) -> Self {
        self.crf = crf;
        self
    }

    pub fn with_binary(mut self, binary: impl Into<OsString>) -> Self {
        self.binary = binary.into();
        self
    }

    fn args(&self, video: &Path, subtitles: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), video.into()];
        args.extend(
            [
                "-vf".to_string(),
                subtitle_filter(subtitles, &self.style),
                "-c:v".to_string(),
                "libx264".to_string(),
                "-crf".to_string(),
                self.crf.to_string(),
                "-preset".to_string(),
                "medium".to_string(),
                "-c:a".to_string(),
                "aac".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(output.into());
        args
    }
}

impl Default for FfmpegSubtitleBurner {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleBurner for FfmpegSubtitleBurner {
    fn burn(
        &self,
        video: &Path,
        subtitles: &Path,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Burning {} into {}", subtitles.display(), output.display());
        let result = Command::new(&self.binary)
            .args(self.args(video, subtitles, output))
            .output()
            .map_err(|e| format!("Failed to run ffmpeg: {e}"))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            let tail: Vec<&str> = tail.into_iter().rev().collect();
            return Err(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                tail.join("\n")
            )
            .into());
        }
        Ok(())
    }
}

/// Builds the `subtitles=` filter argument.
///
/// The path is quoted for the filter graph and escaped for the filter's own
/// option parser: backslashes and colons get a backslash, and a single quote
/// closes the quoted run, is emitted as `\\\'` and reopens it.
pub fn subtitle_filter(subtitles: &Path, style: &str) -> String {
    let escaped = subtitles
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', r"'\\\''");
    format!("subtitles='{escaped}':force_style='{style}'")
}
