use crate::aggregator::{Aggregator, Tally};
use crate::sampler::{FrameSampler, SampleRate};
use crate::{Detector, VideoSource};

/// Drives one already-opened stream start to finish: sample frames at `rate`,
/// run each through the detector, fold the labels into a [`Tally`].
///
/// A detector fault on one frame is contained there: it is logged, counted in
/// `frames_failed`, and the run continues. A stream with no decodable frames
/// is a successful run with an empty table.
pub fn tally_stream<S, D>(source: S, detector: &mut D, rate: SampleRate) -> Tally
where
    S: VideoSource,
    D: Detector<Frame = S::Frame>,
{
    let mut sampler = FrameSampler::new(source, rate);
    let mut agg = Aggregator::new();

    for sampled in &mut sampler {
        match detector.detect(&sampled.frame) {
            Ok(detections) => agg.record(&detections),
            Err(err) => {
                log::warn!("skipping frame {}: {}", sampled.index, err);
                agg.record_failure();
            }
        }
    }

    agg.finish(sampler.frames_decoded())
}

/// Opens `path` with the OpenCV-backed source and tallies it.
///
/// `Err` means the source could not be opened and nothing was processed,
/// which is distinct from `Ok` with an empty table.
#[cfg(feature = "opencv-source")]
pub fn tally_file<D>(
    path: &str,
    detector: &mut D,
    rate: SampleRate,
) -> Result<Tally, crate::error::Error>
where
    D: Detector<Frame = opencv::core::Mat>,
{
    let source = crate::opencv::OpencvSource::open(path)?;
    Ok(tally_stream(source, detector, rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Detection;
    use crate::error::Error;

    struct VecSource {
        fps: f64,
        remaining: std::vec::IntoIter<u64>,
    }

    impl VecSource {
        fn with_len(fps: f64, len: u64) -> Self {
            Self {
                fps,
                remaining: (0..len).collect::<Vec<_>>().into_iter(),
            }
        }
    }

    impl VideoSource for VecSource {
        type Frame = u64;

        fn nominal_fps(&self) -> f64 {
            self.fps
        }

        fn next_frame(&mut self) -> Option<u64> {
            self.remaining.next()
        }
    }

    /// Detector scripted per frame index; unscripted frames detect nothing.
    struct Scripted<F: Fn(u64) -> Result<Vec<Detection>, Error>>(F);

    impl<F: Fn(u64) -> Result<Vec<Detection>, Error>> Detector for Scripted<F> {
        type Frame = u64;

        fn detect(&mut self, frame: &u64) -> Result<Vec<Detection>, Error> {
            (self.0)(*frame)
        }
    }

    fn rate(r: f64) -> SampleRate {
        SampleRate::per_second(r).unwrap()
    }

    #[test]
    fn thirty_fps_ninety_frames_at_one_fps_examines_three() {
        let mut detector = Scripted(|_| Ok(vec![]));

        let tally = tally_stream(VecSource::with_len(30.0, 90), &mut detector, rate(1.0));
        assert_eq!(tally.frames_decoded, 90);
        assert_eq!(tally.frames_processed, 3);
        assert_eq!(tally.frames_failed, 0);
        assert!(tally.is_empty());
    }

    #[test]
    fn labels_accumulate_across_sampled_frames() {
        // person,person,car on frame 0; car on frame 30; nothing on 60.
        let mut detector = Scripted(|idx| {
            Ok(match idx {
                0 => vec![
                    Detection::labeled("person"),
                    Detection::labeled("person"),
                    Detection::labeled("car"),
                ],
                30 => vec![Detection::labeled("car")],
                _ => vec![],
            })
        });

        let tally = tally_stream(VecSource::with_len(30.0, 90), &mut detector, rate(1.0));
        assert_eq!(tally.get("person"), 2);
        assert_eq!(tally.get("car"), 2);
        assert_eq!(tally.counts.len(), 2);
    }

    #[test]
    fn detector_fault_skips_only_that_frame() {
        let mut detector = Scripted(|idx| match idx {
            0 => Ok(vec![Detection::labeled("person")]),
            30 => Err(Error::Detection("bad frame".into())),
            _ => Ok(vec![Detection::labeled("car")]),
        });

        let tally = tally_stream(VecSource::with_len(30.0, 90), &mut detector, rate(1.0));
        assert_eq!(tally.get("person"), 1);
        assert_eq!(tally.get("car"), 1);
        assert_eq!(tally.frames_processed, 2);
        assert_eq!(tally.frames_failed, 1);
    }

    #[test]
    fn zero_frame_stream_completes_successfully() {
        let mut detector = Scripted(|_| Ok(vec![Detection::labeled("ghost")]));

        let tally = tally_stream(VecSource::with_len(30.0, 0), &mut detector, rate(1.0));
        assert!(tally.is_empty());
        assert_eq!(tally.frames_decoded, 0);
        assert_eq!(tally.frames_processed, 0);
    }

    #[test]
    fn unknown_fps_uses_fallback_interval() {
        let mut detector = Scripted(|_| Ok(vec![]));

        // 60 frames with no declared fps: fallback 30 gives 2 samples.
        let tally = tally_stream(VecSource::with_len(0.0, 60), &mut detector, rate(1.0));
        assert_eq!(tally.frames_processed, 2);
    }
}
