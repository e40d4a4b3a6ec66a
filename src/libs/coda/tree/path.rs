use super::SearchTree;
use crate::libs::coda::error::CodaError;
use crate::libs::coda::node::{NodeId, NOISE};
use std::cmp::Ordering;

/// One consumed stretch of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Coda type, or `NOISE`
    pub coda: i32,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(coda: i32, start: usize, end: usize) -> Self {
        Self { coda, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn is_noise(&self) -> bool {
        self.coda == NOISE
    }
}

impl From<Segment> for (i32, usize, usize) {
    fn from(s: Segment) -> Self {
        (s.coda, s.start, s.end)
    }
}

/// A root-to-leaf path of the search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub segments: Vec<Segment>,
    pub score: f64,
}

impl Segmentation {
    /// The path as `(coda, start, end)` triples
    pub fn triples(&self) -> Vec<(i32, usize, usize)> {
        self.segments.iter().map(|&s| s.into()).collect()
    }

    pub fn noise_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_noise()).count()
    }

    /// End of the last segment
    pub fn end(&self) -> usize {
        self.segments.last().map_or(0, |s| s.end)
    }

    /// Check that the segments are contiguous from 0 and stay within `len`.
    pub fn check_bounds(&self, len: usize) -> Result<(), CodaError> {
        let mut expected = 0;
        for s in &self.segments {
            if s.start != expected {
                return Err(CodaError::Discontiguous {
                    start: s.start,
                    expected,
                });
            }
            if s.end > len {
                return Err(CodaError::Overrun { end: s.end, len });
            }
            expected = s.end;
        }
        Ok(())
    }

    /// Check contiguity and that the whole sequence of `len` intervals is covered.
    pub fn check_coverage(&self, len: usize) -> Result<(), CodaError> {
        self.check_bounds(len)?;
        if self.end() != len {
            return Err(CodaError::Incomplete {
                end: self.end(),
                len,
            });
        }
        Ok(())
    }

    /// Ranking of two complete paths: lower score, then fewer noise segments,
    /// then fewer segments.
    fn rank(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.noise_count().cmp(&other.noise_count()))
            .then_with(|| self.segments.len().cmp(&other.segments.len()))
    }
}

/// Every root-to-leaf path in preorder, with its cumulative score.
///
/// Template nodes add their distance, noise nodes add `extra_value`.
/// A tree with nothing below the root has no paths.
pub fn leaf_paths(tree: &SearchTree, extra_value: f64) -> Vec<Segmentation> {
    let mut paths = Vec::new();

    // Each entry owns the path leading to it
    let mut stack: Vec<(NodeId, Vec<Segment>, f64)> = vec![(tree.root(), Vec::new(), 0.0)];

    while let Some((id, segments, score)) = stack.pop() {
        let node = &tree.nodes[id];

        let (segments, score) = match node.coda {
            None => (segments, score),
            Some(coda) => {
                let cost = if node.is_noise() {
                    extra_value
                } else {
                    node.distance
                };
                let mut next = segments;
                next.push(Segment::new(coda, node.start, node.end));
                (next, score + cost)
            }
        };

        if node.is_leaf() {
            if !node.is_root() {
                paths.push(Segmentation { segments, score });
            }
            continue;
        }

        for &child in node.children.iter().rev() {
            stack.push((child, segments.clone(), score));
        }
    }

    paths
}

/// The best complete segmentation of the tree's sequence.
///
/// Only paths reaching the end of the sequence compete. Among them the lowest
/// score wins; ties prefer fewer noise segments, then fewer segments, then the
/// earlier path in preorder. `Ok(None)` means no segmentation was found.
///
/// ```
/// use codas::libs::coda::params::SearchParams;
/// use codas::libs::coda::template::{Template, Templates};
/// use codas::libs::coda::tree::{build, path};
///
/// let mut templates = Templates::new();
/// templates.insert(Template::new(0, vec![0.5, 1.0]));
///
/// let seq = [0.2, 0.2, 0.9, 0.3, 0.3];
/// let tree = build::build(&seq, &templates, &SearchParams::default()).unwrap();
/// let best = path::best_path(&tree, 0.05).unwrap().unwrap();
/// assert_eq!(best.triples(), vec![(0, 0, 3), (0, 3, 5)]);
/// ```
pub fn best_path(tree: &SearchTree, extra_value: f64) -> Result<Option<Segmentation>, CodaError> {
    let len = tree.seq_len();
    let mut best: Option<Segmentation> = None;

    for path in leaf_paths(tree, extra_value) {
        path.check_bounds(len)?;
        if path.end() != len {
            continue;
        }

        let better = match &best {
            None => true,
            Some(current) => path.rank(current) == Ordering::Less,
        };
        if better {
            best = Some(path);
        }
    }

    if let Some(path) = &best {
        path.check_coverage(len)?;
    }
    Ok(best)
}
