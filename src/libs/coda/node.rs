/// NodeId is an index into the search tree's node vector.
pub type NodeId = usize;

/// Code of a one-interval segment that matched no template
pub const NOISE: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index in the arena, assigned in creation order
    pub id: NodeId,

    /// Parent node ID (None for the root and for nodes not attached yet)
    pub parent: Option<NodeId>,

    /// Continuations of the segmentation consumed so far
    pub children: Vec<NodeId>,

    // --- Payload ---

    /// Matched coda type, `Some(NOISE)` for noise, `None` for the root
    pub coda: Option<i32>,

    /// Distance to the template; zero for the root and for noise
    pub distance: f64,

    /// Half-open range of consumed intervals in the whole sequence
    pub start: usize,
    pub end: usize,

    /// The consumed intervals
    pub intervals: Vec<f64>,
}

impl Node {
    /// Create the root sentinel: nothing consumed yet
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            coda: None,
            distance: 0.0,
            start: 0,
            end: 0,
            intervals: Vec::new(),
        }
    }

    /// Set the matched coda type and its distance (builder pattern)
    pub fn with_coda(mut self, coda: i32, distance: f64) -> Self {
        self.coda = Some(coda);
        self.distance = distance;
        self
    }

    /// Set the consumed range and its intervals (builder pattern)
    pub fn with_span(mut self, start: usize, intervals: &[f64]) -> Self {
        self.start = start;
        self.end = start + intervals.len();
        self.intervals = intervals.to_vec();
        self
    }

    pub fn is_root(&self) -> bool {
        self.coda.is_none()
    }

    pub fn is_noise(&self) -> bool {
        self.coda == Some(NOISE)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// One-line description used when printing the tree
    pub fn label(&self) -> String {
        match self.coda {
            None => "root".to_string(),
            Some(NOISE) => format!("noise [{}, {})", self.start, self.end),
            Some(coda) => format!(
                "{} ({:.4}) [{}, {})",
                coda, self.distance, self.start, self.end
            ),
        }
    }
}
