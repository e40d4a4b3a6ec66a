pub mod distance;
pub mod error;
pub mod node;
pub mod params;
pub mod record;
pub mod rhythm;
pub mod template;
pub mod tree;

pub use error::CodaError;
pub use node::{Node, NodeId, NOISE};
pub use params::SearchParams;
pub use template::{Template, Templates};
pub use tree::path::{Segment, Segmentation};
pub use tree::SearchTree;

/// Segment one sequence of intervals against the templates.
///
/// Builds the search tree and returns its best complete path, `Ok(None)` when
/// no segmentation covers the whole sequence.
///
/// ```
/// use codas::libs::coda::{segment, SearchParams, Template, Templates};
///
/// let mut templates = Templates::new();
/// templates.insert(Template::new(1, vec![0.25, 0.5, 1.0]));
///
/// let seq = [0.1, 0.1, 0.2, 0.6, 0.2, 0.2, 0.4];
/// let best = segment(&seq, &templates, &SearchParams::default()).unwrap().unwrap();
/// assert_eq!(best.triples(), vec![(1, 0, 4), (1, 4, 7)]);
/// ```
pub fn segment(
    seq: &[f64],
    templates: &Templates,
    params: &SearchParams,
) -> Result<Option<Segmentation>, CodaError> {
    let tree = tree::build::build(seq, templates, params)?;
    tree::path::best_path(&tree, params.extra_value)
}
