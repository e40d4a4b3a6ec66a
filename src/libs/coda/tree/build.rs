use super::SearchTree;
use crate::libs::coda::distance;
use crate::libs::coda::error::CodaError;
use crate::libs::coda::node::{Node, NodeId, NOISE};
use crate::libs::coda::params::SearchParams;
use crate::libs::coda::template::Templates;

/// A pending search: match the sequence from `offset` onward as a continuation
/// of `node`, considering at most `window` leading intervals.
#[derive(Debug, Clone, Copy)]
struct Task {
    node: NodeId,
    offset: usize,
    window: usize,
}

struct Builder<'a> {
    seq: &'a [f64],
    templates: &'a Templates,
    params: &'a SearchParams,
    tree: SearchTree,
    pending: Vec<Task>,
}

/// Build the tree of admissible segmentations of `seq`.
///
/// At each position the widest window is tried first. When a window yields
/// candidates, every candidate becomes a child that consumes its template's
/// length and is searched again from a full window. When it yields none, the
/// first interval is tried as noise (once per node), and the window shrinks by
/// one before the position is given up.
///
/// ```
/// use codas::libs::coda::params::SearchParams;
/// use codas::libs::coda::template::{Template, Templates};
/// use codas::libs::coda::tree::build;
///
/// let mut templates = Templates::new();
/// templates.insert(Template::new(0, vec![0.5, 1.0]));
///
/// // one coda, its trailing gap, then the same coda again
/// let seq = [0.2, 0.2, 0.9, 0.3, 0.3];
/// let tree = build::build(&seq, &templates, &SearchParams::default()).unwrap();
/// assert_eq!(tree.len(), 3);
/// ```
pub fn build(
    seq: &[f64],
    templates: &Templates,
    params: &SearchParams,
) -> Result<SearchTree, CodaError> {
    let mut builder = Builder {
        seq,
        templates,
        params,
        tree: SearchTree::new(seq.len()),
        pending: Vec::new(),
    };

    if !seq.is_empty() {
        builder.pending.push(Task {
            node: builder.tree.root(),
            offset: 0,
            window: params.max_window.max(1),
        });
    }

    while let Some(task) = builder.pending.pop() {
        builder.search(task)?;
    }

    log::debug!(
        "Search tree of {} intervals: {} nodes",
        seq.len(),
        builder.tree.len()
    );
    Ok(builder.tree)
}

impl Builder<'_> {
    fn candidates(&self, window: &[f64]) -> Vec<(i32, f64)> {
        distance::candidates(
            window,
            self.templates,
            self.params.threshold,
            self.params.limit,
            self.params.only_equal,
        )
    }

    fn new_node(&mut self, node: Node) -> Result<NodeId, CodaError> {
        if self.tree.len() >= self.params.max_nodes {
            return Err(CodaError::NodeBudget(self.params.max_nodes));
        }
        Ok(self.tree.add_node(node))
    }

    /// A noise segment consuming the single interval at `offset`
    fn new_noise(&mut self, offset: usize) -> Result<NodeId, CodaError> {
        let node = Node::new(0)
            .with_coda(NOISE, 0.0)
            .with_span(offset, &self.seq[offset..offset + 1]);
        self.new_node(node)
    }

    fn search(&mut self, task: Task) -> Result<(), CodaError> {
        let seq = self.seq;
        let rest = &seq[task.offset..];

        let found = self.candidates(&rest[..task.window.min(rest.len())]);
        if !found.is_empty() {
            return self.expand(task.node, task.offset, &found);
        }

        // Skip one interval as noise, unless this node already tried it
        if !self.tree.has_noise_child(task.node) {
            let shifted = rest
                .get(1..(task.window + 1).min(rest.len()))
                .unwrap_or(&[]);
            let found = self.candidates(shifted);
            if !found.is_empty() {
                let noise = self.new_noise(task.offset)?;
                self.expand(noise, task.offset + 1, &found)?;
                self.tree.add_child(task.node, noise)?;
            }
        }

        // Back off to shorter matches at the same position
        if task.window > 1 {
            self.pending.push(Task {
                window: task.window - 1,
                ..task
            });
        }

        Ok(())
    }

    /// Attach one child per candidate to `parent`, each matched at `offset`.
    fn expand(
        &mut self,
        parent: NodeId,
        offset: usize,
        found: &[(i32, f64)],
    ) -> Result<(), CodaError> {
        let seq = self.seq;
        let rest = &seq[offset..];

        for &(coda, dist) in found {
            let length = self.templates.get(coda).map_or(1, |t| t.length());
            let seg_len = length.min(rest.len());

            let node = Node::new(0)
                .with_coda(coda, dist)
                .with_span(offset, &rest[..seg_len]);
            let child = self.new_node(node)?;
            self.tree.add_child(parent, child)?;

            let next = offset + seg_len;
            match seq.len() - next {
                0 => {}
                1 => {
                    let noise = self.new_noise(next)?;
                    self.tree.add_child(child, noise)?;
                }
                _ => self.pending.push(Task {
                    node: child,
                    offset: next,
                    window: self.params.max_window.max(1),
                }),
            }
        }

        Ok(())
    }
}
