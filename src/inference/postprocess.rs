//! YOLO output decoding and non-maximum suppression.

use crate::constants::yolo::{BOX_COORDS, STRIDES};
use crate::error::{Error, Result};
use crate::inference::{BoundingBox, RawDetection};

/// Thresholds applied while turning raw model output into detections.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Candidates scoring below this are discarded.
    pub min_confidence: f32,
    /// Same-class boxes overlapping more than this are suppressed.
    pub iou_threshold: f32,
    /// Upper bound on returned detections.
    pub max_detections: usize,
    /// Anchor count implied by the model input size, used to tell the two
    /// output layouts apart.
    pub expected_anchors: Option<usize>,
}

/// Number of prediction anchors a YOLOv8 head emits for an input size.
pub fn anchor_count(width: u32, height: u32) -> usize {
    STRIDES
        .iter()
        .map(|&stride| (width.div_ceil(stride) * height.div_ceil(stride)) as usize)
        .sum()
}

/// Decode a YOLOv8-style output tensor into candidate detections.
///
/// Accepts `[1, 4 + nc, anchors]` (the exporter default) or the transposed
/// `[1, anchors, 4 + nc]`. Boxes are `cx, cy, w, h` in model input pixels and
/// are returned as corners in the same space.
///
/// The layout is picked by matching `expected_anchors` against the output
/// dimensions. Without a match the longer axis is taken as the anchor axis.
pub fn decode_predictions(
    data: &[f32],
    shape: &[usize],
    min_confidence: f32,
    expected_anchors: Option<usize>,
) -> Result<Vec<RawDetection>> {
    let &[batch, dim_a, dim_b] = shape else {
        return Err(Error::Inference {
            reason: format!("unexpected output rank: {shape:?}"),
        });
    };
    if batch != 1 || data.len() != dim_a * dim_b {
        return Err(Error::Inference {
            reason: format!(
                "output shape {shape:?} does not match {} values",
                data.len()
            ),
        });
    }

    let channels_first = match expected_anchors {
        Some(anchors) if dim_b == anchors && dim_a != anchors => true,
        Some(anchors) if dim_a == anchors && dim_b != anchors => false,
        _ => dim_a <= dim_b,
    };
    let (features, anchors) = if channels_first {
        (dim_a, dim_b)
    } else {
        (dim_b, dim_a)
    };
    if features <= BOX_COORDS {
        return Err(Error::Inference {
            reason: format!("output shape {shape:?} carries no class scores"),
        });
    }

    let at = |anchor: usize, feature: usize| {
        if channels_first {
            data[feature * anchors + anchor]
        } else {
            data[anchor * features + feature]
        }
    };

    let mut candidates = Vec::new();
    for anchor in 0..anchors {
        let mut best_class = 0;
        let mut best_score = f32::NEG_INFINITY;
        for class_id in 0..features - BOX_COORDS {
            let score = at(anchor, BOX_COORDS + class_id);
            if score > best_score {
                best_score = score;
                best_class = class_id;
            }
        }

        if best_score.is_nan() || best_score < min_confidence {
            continue;
        }

        let (cx, cy) = (at(anchor, 0), at(anchor, 1));
        let (half_w, half_h) = (at(anchor, 2) / 2.0, at(anchor, 3) / 2.0);
        candidates.push(RawDetection {
            class_id: best_class,
            confidence: best_score,
            bbox: BoundingBox::from_corners(cx - half_w, cy - half_h, cx + half_w, cy + half_h),
        });
    }

    Ok(candidates)
}

/// Class-aware greedy non-maximum suppression.
///
/// Output is ordered by descending confidence. The sort is stable, so equal
/// scores keep their decode order.
pub fn non_maximum_suppression(
    mut candidates: Vec<RawDetection>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<RawDetection> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<RawDetection> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept.iter().any(|k| {
            k.class_id == candidate.class_id && k.bbox.iou(&candidate.bbox) > iou_threshold
        });
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}

/// Decode and suppress in one step.
pub fn postprocess(data: &[f32], shape: &[usize], options: DecodeOptions) -> Result<Vec<RawDetection>> {
    let candidates = decode_predictions(
        data,
        shape,
        options.min_confidence,
        options.expected_anchors,
    )?;
    Ok(non_maximum_suppression(
        candidates,
        options.iou_threshold,
        options.max_detections,
    ))
}
