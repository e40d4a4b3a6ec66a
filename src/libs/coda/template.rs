use super::rhythm;
use crate::libs::table::{self, Table};
use anyhow::Context;
use std::collections::BTreeMap;

/// Reference rhythm of one coda type.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Coda-type code
    pub id: i32,

    /// Mean fraction of the coda duration elapsed after each interval.
    /// Non-decreasing, the last value is 1.0 up to rounding.
    profile: Vec<f64>,
}

impl Template {
    pub fn new(id: i32, profile: Vec<f64>) -> Self {
        Self { id, profile }
    }

    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    /// Number of intervals compared against the profile
    pub fn span(&self) -> usize {
        self.profile.len()
    }

    /// Number of raw intervals a match consumes: the coda's own intervals
    /// plus the gap that follows it.
    ///
    /// ```
    /// use codas::libs::coda::template::Template;
    /// let t = Template::new(3, vec![0.25, 0.5, 1.0]);
    /// assert_eq!(t.span(), 3);
    /// assert_eq!(t.length(), 4);
    /// ```
    pub fn length(&self) -> usize {
        self.span() + 1
    }

    /// Intervals that reproduce the profile exactly, scaled to a total of `duration`.
    ///
    /// ```
    /// use codas::libs::coda::template::Template;
    /// let t = Template::new(0, vec![0.25, 0.5, 1.0]);
    /// assert_eq!(t.intervals(2.0), vec![0.5, 0.5, 1.0]);
    /// ```
    pub fn intervals(&self, duration: f64) -> Vec<f64> {
        let mut prev = 0.0;
        self.profile
            .iter()
            .map(|&p| {
                let v = (p - prev) * duration;
                prev = p;
                v
            })
            .collect()
    }
}

/// Normalized cumulative profile: each value divided by the total, then accumulated.
///
/// Returns `None` when the total is not a positive number.
///
/// ```
/// let p = codas::libs::coda::template::cumulative_profile(&[1.0, 1.0, 2.0]).unwrap();
/// assert_eq!(p, vec![0.25, 0.5, 1.0]);
/// assert!(codas::libs::coda::template::cumulative_profile(&[0.0, 0.0]).is_none());
/// ```
pub fn cumulative_profile(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }

    let mut acc = 0.0;
    Some(
        values
            .iter()
            .map(|&v| {
                acc += v / total;
                acc
            })
            .collect(),
    )
}

/// The template set, ordered by coda-type code.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Templates {
    inner: BTreeMap<i32, Template>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template. The unclassified code is never stored.
    pub fn insert(&mut self, template: Template) {
        if template.id != rhythm::UNCLASSIFIED {
            self.inner.insert(template.id, template);
        }
    }

    pub fn get(&self, id: i32) -> Option<&Template> {
        self.inner.get(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Templates in ascending code order
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.inner.values()
    }

    /// Code -> number of intervals consumed by a match
    pub fn lengths(&self) -> BTreeMap<i32, usize> {
        self.inner.iter().map(|(&id, t)| (id, t.length())).collect()
    }

    /// Most intervals any match can consume, 0 for an empty set
    pub fn max_length(&self) -> usize {
        self.inner.values().map(Template::length).max().unwrap_or(0)
    }

    /// Parse the JSON form `{"0": [0.41, 1.0], "1": [...]}`
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let profiles: BTreeMap<i32, Vec<f64>> =
            serde_json::from_str(content).context("invalid template file")?;

        let mut templates = Self::new();
        for (id, profile) in profiles {
            if profile.is_empty() {
                log::warn!("Template {} has an empty profile, skipped", id);
                continue;
            }
            templates.insert(Template::new(id, profile));
        }
        Ok(templates)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        let profiles: BTreeMap<i32, &Vec<f64>> = self
            .inner
            .iter()
            .map(|(&id, t)| (id, &t.profile))
            .collect();
        Ok(serde_json::to_string(&profiles)?)
    }

    pub fn from_path(infile: &str) -> anyhow::Result<Self> {
        let content = crate::read_to_string(infile)?;
        Self::from_json(&content).with_context(|| format!("loading templates from {}", infile))
    }
}

/// One annotated coda of the training table.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub code: i32,
    pub intervals: Vec<f64>,
}

impl LabeledRow {
    pub fn new(label: &str, intervals: Vec<f64>) -> Self {
        Self {
            code: rhythm::code_of(label),
            intervals,
        }
    }

    /// Read the rows of a training table with a `CodaType` column and `ICI1..ICIn`.
    pub fn from_table(table: &Table) -> anyhow::Result<Vec<Self>> {
        let label_col = table.require("CodaType")?;
        let ici_cols = table.numbered_columns("ICI");
        if ici_cols.is_empty() {
            anyhow::bail!("no ICI columns in the training table");
        }

        let mut rows = Vec::with_capacity(table.len());
        let mut unknown = 0;
        for (i, row) in table.rows.iter().enumerate() {
            let label = row[label_col].as_str();
            if !rhythm::is_known(label) {
                unknown += 1;
            }
            let intervals = table
                .check_row(i)
                .and_then(|_| table::parse_intervals(row, &ici_cols))
                .with_context(|| format!("training row {}", i + 1))?;
            rows.push(Self::new(label, intervals));
        }

        if unknown > 0 {
            log::warn!("{} rows carry labels outside the rhythm table", unknown);
        }
        Ok(rows)
    }
}

/// Mean normalized cumulative profile of a group of raw interval rows.
///
/// Every row contributes its first `min_length` intervals, where `min_length` is
/// the smallest count of non-zero intervals in the group. Returns `None` for an
/// empty group or when no row has a usable interval.
pub fn mean_profile(group: &[&[f64]]) -> Option<Vec<f64>> {
    let min_length = group
        .iter()
        .map(|row| row.iter().filter(|&&v| v != 0.0).count())
        .min()?;
    if min_length == 0 {
        return None;
    }

    let mut sums = vec![0.0; min_length];
    let mut n = 0usize;
    for row in group {
        // the leading forced zero of every row averages to zero and is never stored
        if let Some(profile) = cumulative_profile(&row[..min_length]) {
            for (s, p) in sums.iter_mut().zip(profile) {
                *s += p;
            }
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }

    Some(sums.into_iter().map(|s| s / n as f64).collect())
}

/// Build one template per coda type present in the labeled rows.
///
/// Unclassified rows are dropped. Groups without a usable profile yield no template.
pub fn build(rows: &[LabeledRow]) -> Templates {
    let mut groups: BTreeMap<i32, Vec<&[f64]>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.code != rhythm::UNCLASSIFIED) {
        groups.entry(row.code).or_default().push(&row.intervals);
    }

    let mut templates = Templates::new();
    for (code, group) in groups {
        match mean_profile(&group) {
            Some(profile) => {
                log::debug!(
                    "Template {}: {} rows, {} intervals",
                    code,
                    group.len(),
                    profile.len()
                );
                templates.insert(Template::new(code, profile));
            }
            None => log::warn!("Coda type {} has no usable rows, skipped", code),
        }
    }

    templates
}
