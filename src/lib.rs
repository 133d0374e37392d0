pub mod aggregator;
pub mod detection;
pub mod error;
pub mod pipeline;
pub mod replay;
pub mod sampler;

#[cfg(feature = "opencv-source")]
pub mod opencv;

pub use aggregator::{Aggregator, Tally};
pub use detection::{BBox, Detection};
pub use error::Error;
pub use pipeline::tally_stream;
pub use replay::ReplayDetector;
pub use sampler::{FrameSampler, SampleRate, SampledFrame, FALLBACK_FPS};

#[cfg(feature = "opencv-source")]
pub use pipeline::tally_file;

/// An ordered, finite stream of decoded frames with a declared frame rate.
///
/// Opening is the implementor's constructor (returning `Result`); releasing
/// happens on drop. The stream is consumed by a single reader in decode
/// order and is not restartable.
pub trait VideoSource {
    type Frame;

    /// Frame rate declared by the container, 0.0 when unknown or malformed.
    fn nominal_fps(&self) -> f64;

    /// Next decoded frame, `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Option<Self::Frame>;
}

/// Turns one frame into zero or more labeled detections.
///
/// Model loading and configuration live with the implementor; the pipeline
/// calls `detect` exactly once per sampled frame and treats a per-frame
/// error as recoverable.
pub trait Detector {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<Detection>, Error>;
}
