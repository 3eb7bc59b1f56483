pub mod audio;
pub mod captions;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod translation;
pub mod video;
