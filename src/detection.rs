use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Axis-aligned bounding box, (x,y) is the center of the box.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BBox {
    #[inline]
    pub fn xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline(always)]
    pub fn xmin(&self) -> f32 {
        self.x - self.w / 2.
    }

    #[inline(always)]
    pub fn xmax(&self) -> f32 {
        self.x + self.w / 2.
    }

    #[inline(always)]
    pub fn ymin(&self) -> f32 {
        self.y - self.h / 2.
    }

    #[inline(always)]
    pub fn ymax(&self) -> f32 {
        self.y + self.h / 2.
    }

    pub fn iou(&self, other: &BBox) -> f32 {
        let b1_area = (self.w + 1.) * (self.h + 1.);
        let b2_area = (other.w + 1.) * (other.h + 1.);

        let i_xmin = self.xmin().max(other.xmin());
        let i_xmax = self.xmax().min(other.xmax());
        let i_ymin = self.ymin().max(other.ymin());
        let i_ymax = self.ymax().min(other.ymax());
        let i_area = (i_xmax - i_xmin + 1.).max(0.) * (i_ymax - i_ymin + 1.).max(0.);

        i_area / (b1_area + b2_area - i_area)
    }
}

/// One labeled observation emitted by a detector for a single frame.
///
/// Only the label takes part in aggregation; confidence and bounding box are
/// carried when the detector provides them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

impl Detection {
    pub fn labeled<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            confidence: None,
            bbox: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Checks the record at the detector boundary so nothing downstream has
    /// to re-validate. Labels must be non-empty, confidence within [0, 1],
    /// box extents finite and non-negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.label.is_empty() {
            return Err(Error::Detection("empty detection label".into()));
        }

        if let Some(p) = self.confidence {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::Detection(format!(
                    "confidence {} out of range for '{}'",
                    p, self.label
                )));
            }
        }

        if let Some(bbox) = &self.bbox {
            let finite = [bbox.x, bbox.y, bbox.w, bbox.h]
                .iter()
                .all(|v| v.is_finite());
            if !finite || bbox.w < 0.0 || bbox.h < 0.0 {
                return Err(Error::Detection(format!(
                    "degenerate bounding box for '{}'",
                    self.label
                )));
            }
        }

        Ok(())
    }
}
