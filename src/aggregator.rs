use std::collections::HashMap;

use crate::detection::Detection;

/// Running label→count table, fed one frame's detections at a time.
///
/// Labels are compared verbatim, no normalization. Repeated labels within a
/// single frame each count once; addition is commutative, so the delivery
/// order of frames never changes the final table.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: HashMap<String, u64>,
    frames_processed: u64,
    frames_failed: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one processed frame's detections into the table.
    pub fn record(&mut self, detections: &[Detection]) {
        for det in detections {
            *self.counts.entry(det.label.clone()).or_insert(0) += 1;
        }

        self.frames_processed += 1;
    }

    /// Counts a sampled frame the detector failed on. The frame contributes
    /// nothing to the table.
    pub fn record_failure(&mut self) {
        self.frames_failed += 1;
    }

    #[inline]
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn finish(self, frames_decoded: u64) -> Tally {
        Tally {
            counts: self.counts,
            frames_decoded,
            frames_processed: self.frames_processed,
            frames_failed: self.frames_failed,
        }
    }
}

/// Final summary for one video: cumulative label counts plus how many frames
/// were decoded, analyzed, and skipped over detector faults.
///
/// `frames_decoded == 0` on a successful run means the stream held no
/// decodable frames at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub counts: HashMap<String, u64>,
    pub frames_decoded: u64,
    pub frames_processed: u64,
    pub frames_failed: u64,
}

impl Tally {
    #[inline]
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Deterministic presentation order: count descending, then label.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<_> = self
            .counts
            .iter()
            .map(|(label, &count)| (label.as_str(), count))
            .collect();
        rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        rows
    }
}
