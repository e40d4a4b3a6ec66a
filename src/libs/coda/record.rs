//! Output rows of a segmentation: one per segment, with absolute timing.

use super::rhythm::UNCLASSIFIED;
use super::tree::path::Segmentation;

/// Minimal number of interval columns in segment tables
pub const PADDED_WIDTH: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    /// Time of the segment's first click
    pub start_time: f64,

    /// Coda type, `NOISE`, or `UNCLASSIFIED` for an unsegmented sequence
    pub coda: i32,

    /// Sum of the segment's intervals
    pub duration: f64,

    pub intervals: Vec<f64>,
}

impl SegmentRecord {
    /// Intervals right-padded with zeros to `width`
    pub fn padded(&self, width: usize) -> Vec<f64> {
        let mut values = self.intervals.clone();
        if values.len() < width {
            values.resize(width, 0.0);
        }
        values
    }

    pub fn is_unsegmented(&self) -> bool {
        self.coda == UNCLASSIFIED
    }
}

/// One record per segment. `base_time` is the time of the sequence's first click.
///
/// ```
/// use codas::libs::coda::record::records;
/// use codas::libs::coda::{Segment, Segmentation};
///
/// let seg = Segmentation {
///     segments: vec![Segment::new(0, 0, 3), Segment::new(100, 3, 4)],
///     score: 0.05,
/// };
/// let rows = records(&[0.25, 0.25, 1.0, 0.5], 10.0, &seg);
/// assert_eq!(rows[1].start_time, 11.5);
/// assert_eq!(rows[0].duration, 1.5);
/// assert_eq!(rows[1].coda, 100);
/// ```
pub fn records(seq: &[f64], base_time: f64, segmentation: &Segmentation) -> Vec<SegmentRecord> {
    segmentation
        .segments
        .iter()
        .map(|s| {
            let intervals = seq[s.start..s.end].to_vec();
            SegmentRecord {
                start_time: base_time + seq[..s.start].iter().sum::<f64>(),
                coda: s.coda,
                duration: intervals.iter().sum(),
                intervals,
            }
        })
        .collect()
}

/// The marker row of a sequence that could not be segmented
pub fn unsegmented(seq: &[f64], base_time: f64) -> SegmentRecord {
    SegmentRecord {
        start_time: base_time,
        coda: UNCLASSIFIED,
        duration: seq.iter().sum(),
        intervals: Vec::new(),
    }
}
