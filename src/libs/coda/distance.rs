use super::template::{cumulative_profile, Templates};
use std::collections::BTreeMap;

/// Tolerance for "the whole window has been consumed"
pub const FULL_TOLERANCE: f64 = 1e-10;

/// Manhattan distance between two equally long vectors
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Distance of a raw window of intervals to every admissible template.
///
/// The window is normalized over its own total, so the comparison ignores tempo.
/// A template is considered only when its span fits in the window. Then the
/// window's cumulative profile, cut to the span, is inspected for positions equal
/// to 1.0, i.e. places where the window is already fully consumed:
///
/// * `only_equal = true` admits the template only when exactly one such position
///   exists, so the window ends precisely where the template ends;
/// * `only_equal = false` admits it when at most one exists.
///
/// ```
/// use codas::libs::coda::distance::coda_distances;
/// use codas::libs::coda::template::{Template, Templates};
///
/// let mut templates = Templates::new();
/// templates.insert(Template::new(0, vec![0.5, 1.0]));
/// templates.insert(Template::new(1, vec![0.2, 0.4, 1.0]));
///
/// let dist = coda_distances(&[0.3, 0.3], &templates, true);
/// assert_eq!(dist.len(), 1);
/// assert!(dist[&0].abs() < 1e-12);
/// ```
pub fn coda_distances(window: &[f64], templates: &Templates, only_equal: bool) -> BTreeMap<i32, f64> {
    let mut distances = BTreeMap::new();

    let profile = match cumulative_profile(window) {
        Some(p) => p,
        None => return distances,
    };

    for template in templates.iter() {
        let span = template.span();
        if span > window.len() {
            continue;
        }

        let truncated = &profile[..span];
        let n_equal_one = truncated
            .iter()
            .filter(|&&v| (v - 1.0).abs() < FULL_TOLERANCE)
            .count();

        let admitted = if only_equal {
            n_equal_one == 1
        } else {
            n_equal_one <= 1
        };
        if admitted {
            distances.insert(template.id, manhattan(truncated, template.profile()));
        }
    }

    distances
}

/// Admitted templates ordered by distance, ties by ascending code.
fn ranked(window: &[f64], templates: &Templates, only_equal: bool) -> Vec<(i32, f64)> {
    let mut sorted: Vec<(i32, f64)> = coda_distances(window, templates, only_equal)
        .into_iter()
        .collect();
    // BTreeMap order is ascending code; a stable sort keeps it for equal distances
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    sorted
}

/// The nearest admissible template, if any
pub fn best_match(window: &[f64], templates: &Templates, only_equal: bool) -> Option<(i32, f64)> {
    ranked(window, templates, only_equal).into_iter().next()
}

/// Up to `limit` templates within `threshold` of the window, best first.
pub fn candidates(
    window: &[f64],
    templates: &Templates,
    threshold: f64,
    limit: usize,
    only_equal: bool,
) -> Vec<(i32, f64)> {
    ranked(window, templates, only_equal)
        .into_iter()
        .filter(|&(_, d)| d <= threshold)
        .take(limit)
        .collect()
}
