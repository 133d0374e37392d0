use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The video could not be opened at all. Fatal: no frames are processed.
    #[error("unable to open video source: {0}")]
    SourceOpen(String),

    /// The detector failed on a single frame. Recoverable: the frame is
    /// skipped and processing continues with the next sampled frame.
    #[error("detection failed: {0}")]
    Detection(String),

    /// A non-positive or non-finite sample rate was supplied.
    #[error("invalid sample rate: {0} (must be a positive number)")]
    InvalidRate(f64),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "opencv-source")]
    #[error("OpenCV Error: {0}")]
    Opencv(#[from] opencv::Error),
}
