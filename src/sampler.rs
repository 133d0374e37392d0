use crate::error::Error;
use crate::VideoSource;

/// Substituted when a source declares no usable frame rate.
pub const FALLBACK_FPS: f64 = 30.0;

/// Frames to analyze per second of video. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate(f64);

impl SampleRate {
    pub fn per_second(rate: f64) -> Result<Self, Error> {
        if rate.is_finite() && rate > 0.0 {
            Ok(Self(rate))
        } else {
            Err(Error::InvalidRate(rate))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Stride, in decoded frames, between frames selected for analysis.
    ///
    /// Clamped to at least 1: requesting a rate above the decode rate means
    /// every frame, never more than every frame. A declared fps of zero (or
    /// NaN, or a negative) falls back to [`FALLBACK_FPS`].
    pub fn interval_for(self, nominal_fps: f64) -> u64 {
        let fps = if nominal_fps.is_finite() && nominal_fps > 0.0 {
            nominal_fps
        } else {
            FALLBACK_FPS
        };

        ((fps / self.0).round() as u64).max(1)
    }
}

/// A frame selected for analysis, tagged with its zero-based index in the
/// decoded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFrame<F> {
    pub index: u64,
    pub frame: F,
}

/// Pulls frames from a [`VideoSource`] and yields every Nth one, where N is
/// derived once from the source's declared frame rate and the requested
/// sample rate. Holds at most one frame at a time and consumes the source as
/// it goes; a drained source ends the iterator.
pub struct FrameSampler<S> {
    source: S,
    interval: u64,
    cursor: u64,
}

impl<S: VideoSource> FrameSampler<S> {
    pub fn new(source: S, rate: SampleRate) -> Self {
        let interval = rate.interval_for(source.nominal_fps());
        log::debug!(
            "source fps {}, sampling every {} frame(s)",
            source.nominal_fps(),
            interval
        );

        Self {
            source,
            interval,
            cursor: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Total frames pulled from the source so far, selected or not.
    #[inline]
    pub fn frames_decoded(&self) -> u64 {
        self.cursor
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: VideoSource> Iterator for FrameSampler<S> {
    type Item = SampledFrame<S::Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.source.next_frame()?;
            let index = self.cursor;
            self.cursor += 1;

            if index % self.interval == 0 {
                return Some(SampledFrame { index, frame });
            }
        }
    }
}
