use opencv::{core::Mat, prelude::*, videoio};

use crate::error::Error;
use crate::VideoSource;

/// Video file opened through `opencv::videoio::VideoCapture`.
///
/// The capture is released on drop, so every exit path closes the file.
pub struct OpencvSource {
    cam: videoio::VideoCapture,
}

impl OpencvSource {
    pub fn open(path: &str) -> Result<Self, Error> {
        let cam = videoio::VideoCapture::from_file(path, videoio::CAP_ANY)
            .map_err(|err| Error::SourceOpen(format!("{}: {}", path, err)))?;

        if !videoio::VideoCapture::is_opened(&cam)? {
            return Err(Error::SourceOpen(path.to_string()));
        }

        Ok(Self { cam })
    }
}

impl VideoSource for OpencvSource {
    type Frame = Mat;

    fn nominal_fps(&self) -> f64 {
        self.cam.get(videoio::CAP_PROP_FPS).unwrap_or(0.0)
    }

    fn next_frame(&mut self) -> Option<Mat> {
        let mut frame = Mat::default();
        match self.cam.read(&mut frame) {
            Ok(true) => {}
            Ok(false) | Err(_) => return None,
        }

        // Some backends signal exhaustion with an empty Mat instead.
        if frame.rows() == 0 || frame.cols() == 0 {
            return None;
        }

        Some(frame)
    }
}

impl Drop for OpencvSource {
    fn drop(&mut self) {
        let _ = self.cam.release();
    }
}
