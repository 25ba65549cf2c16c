pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{StreamFormat, VideoMetadata};
pub use traits::ExtractionEngine;
pub use ytdlp::YtDlpEngine;
