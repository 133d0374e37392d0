use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

use crate::detection::Detection;
use crate::error::Error;
use crate::Detector;

/// Replays pre-recorded detections, one row per sampled frame, in order.
///
/// Row format is one line per frame, `<offset_ms>: <json array>`, e.g.
///
/// ```text
/// 0: [{"label":"person","p":0.91}]
/// 1000: []
/// ```
///
/// Lines without a `:` stand for frames with no detections. Frame pixel data
/// is ignored, which makes the replay usable against any source. Once the
/// recording runs out, remaining frames detect nothing.
pub struct ReplayDetector<F> {
    rows: VecDeque<Vec<Detection>>,
    _frame: PhantomData<F>,
}

impl<F> ReplayDetector<F> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rows = VecDeque::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let detections: Vec<Detection> = match line.find(':') {
                Some(idx) => serde_json::from_str(&line[idx + 1..])?,
                None => Vec::new(),
            };

            for det in &detections {
                det.validate()?;
            }

            rows.push_back(detections);
        }

        Ok(Self {
            rows,
            _frame: PhantomData,
        })
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl<F> Detector for ReplayDetector<F> {
    type Frame = F;

    fn detect(&mut self, _frame: &F) -> Result<Vec<Detection>, Error> {
        Ok(self.rows.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn replay(src: &str) -> Result<ReplayDetector<u64>, Error> {
        ReplayDetector::from_reader(Cursor::new(src.to_string()))
    }

    #[test]
    fn parses_rows_in_order() {
        let mut det = replay(
            "0: [{\"label\":\"person\",\"p\":0.9},{\"label\":\"car\"}]\n\
             1000: []\n\
             2000: [{\"label\":\"car\"}]\n",
        )
        .unwrap();

        assert_eq!(det.remaining(), 3);
        assert_eq!(det.detect(&0).unwrap().len(), 2);
        assert!(det.detect(&1).unwrap().is_empty());
        assert_eq!(det.detect(&2).unwrap()[0].label, "car");
    }

    #[test]
    fn exhausted_recording_detects_nothing() {
        let mut det = replay("0: [{\"label\":\"dog\"}]\n").unwrap();
        det.detect(&0).unwrap();
        assert!(det.detect(&1).unwrap().is_empty());
    }

    #[test]
    fn line_without_separator_means_no_detections() {
        let mut det = replay("no detections here\n").unwrap();
        assert!(det.detect(&0).unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_rows_at_load_time() {
        assert!(replay("0: [{\"label\":\"\"}]\n").is_err());
        assert!(replay("0: [{\"label\":\"cat\",\"p\":7.0}]\n").is_err());
        assert!(replay("0: not json\n").is_err());
    }
}
