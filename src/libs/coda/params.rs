/// Knobs of the segmentation search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Candidates kept per window
    pub limit: usize,

    /// Largest admissible distance
    pub threshold: f64,

    /// Admit only windows that end exactly where a template ends
    pub only_equal: bool,

    /// Widest match window, in intervals
    pub max_window: usize,

    /// Score charged for every noise segment
    pub extra_value: f64,

    /// Upper bound on the number of tree nodes for one sequence
    pub max_nodes: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: 3,
            threshold: 0.1,
            only_equal: true,
            max_window: 9,
            extra_value: 0.05,
            max_nodes: 1_000_000,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_only_equal(mut self, only_equal: bool) -> Self {
        self.only_equal = only_equal;
        self
    }

    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.max_window = max_window.max(1);
        self
    }

    pub fn with_extra_value(mut self, extra_value: f64) -> Self {
        self.extra_value = extra_value;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
