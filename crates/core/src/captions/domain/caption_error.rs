use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptionError {
    #[error("max caption width must be at least 1 character")]
    InvalidMaxChars,
    #[error("got {translations} translations for {segments} transcript segments")]
    LengthMismatch { segments: usize, translations: usize },
}
