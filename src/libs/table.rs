//! Minimal comma-separated tables with a header line.
//!
//! Detection and training tables are plain numeric CSV without embedded commas,
//! so a field is simply the text between two separators, trimmed, with
//! surrounding double quotes removed.

use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::io::BufRead;

#[derive(Debug, Default, Clone)]
pub struct Table {
    /// Column names, in file order
    header: Vec<String>,

    /// Column name -> position
    index: IndexMap<String, usize>,

    /// Data rows, each as long as the header
    pub rows: Vec<Vec<String>>,

    /// Row index -> why the row is unusable
    malformed: BTreeMap<usize, String>,
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|f| f.trim().trim_matches('"').to_string())
        .collect()
}

impl Table {
    /// Build an empty table with the given header
    pub fn with_header(header: Vec<String>) -> Self {
        let index = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            header,
            index,
            rows: Vec::new(),
            malformed: BTreeMap::new(),
        }
    }

    /// Parse a table from any buffered reader.
    ///
    /// Blank lines are skipped. Short rows are right-padded with empty fields.
    /// Long rows are truncated to the header and marked malformed, see
    /// [`Table::check_row`].
    ///
    /// ```
    /// let input = "CodaType,ICI1,ICI2\n3R,0.2,0.2\n\n1+1+3,0.3,0.1\n";
    /// let table = codas::libs::table::Table::from_reader(input.as_bytes()).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.column("ICI2"), Some(2));
    /// assert_eq!(table.get(1, "CodaType"), Some("1+1+3"));
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break split_fields(&line);
                    }
                }
                None => return Ok(Self::default()),
            }
        };

        let mut table = Self::with_header(header);
        let width = table.header.len();

        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = split_fields(&line);
            if fields.len() > width {
                let reason = format!(
                    "line {}: {} fields, but the header has {}",
                    i + 2,
                    fields.len(),
                    width
                );
                log::warn!("{}", reason);
                table.malformed.insert(table.rows.len(), reason);
            }
            fields.resize(width, String::new());
            table.rows.push(fields);
        }

        Ok(table)
    }

    /// Read a table from a file name, `stdin` or a `.gz` file
    pub fn from_path(infile: &str) -> anyhow::Result<Self> {
        let reader = crate::reader(infile)?;
        Self::from_reader(reader).with_context(|| format!("malformed table {}", infile))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Position of a named column, or an error naming the missing column
    pub fn require(&self, name: &str) -> anyhow::Result<usize> {
        self.column(name)
            .ok_or_else(|| anyhow!("column `{}` not found", name))
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Whether a row was read intact.
    ///
    /// ```
    /// let input = "id,ICI1\nx,0.5\ny,0.5,9\n";
    /// let table = codas::libs::table::Table::from_reader(input.as_bytes()).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert!(table.check_row(0).is_ok());
    /// assert!(table.check_row(1).is_err());
    /// ```
    pub fn check_row(&self, row: usize) -> anyhow::Result<()> {
        match self.malformed.get(&row) {
            Some(reason) => bail!("malformed row, {}", reason),
            None => Ok(()),
        }
    }

    /// Positions of the numbered columns `{prefix}1`, `{prefix}2`, ..., in numeric order.
    ///
    /// ```
    /// let input = "REC,ICI2,ICI1,ICI10,Whale\n";
    /// let table = codas::libs::table::Table::from_reader(input.as_bytes()).unwrap();
    /// assert_eq!(table.numbered_columns("ICI"), vec![2, 1, 3]);
    /// ```
    pub fn numbered_columns(&self, prefix: &str) -> Vec<usize> {
        let mut numbered: Vec<(usize, usize)> = self
            .index
            .iter()
            .filter_map(|(name, &col)| {
                let n = name.strip_prefix(prefix)?.parse::<usize>().ok()?;
                Some((n, col))
            })
            .collect();
        numbered.sort_unstable();
        numbered.into_iter().map(|(_, col)| col).collect()
    }
}

/// Parse the interval columns of one row. Empty fields count as zero padding.
pub fn parse_intervals(row: &[String], columns: &[usize]) -> anyhow::Result<Vec<f64>> {
    columns
        .iter()
        .map(|&col| {
            let field = row[col].as_str();
            if field.is_empty() {
                Ok(0.0)
            } else {
                field
                    .parse::<f64>()
                    .with_context(|| format!("invalid interval `{}`", field))
            }
        })
        .collect()
}

/// Drop the trailing zero padding of a stored sequence.
///
/// ```
/// let seq = codas::libs::table::strip_padding(&[0.2, 0.0, 0.3, 0.0, 0.0]);
/// assert_eq!(seq, vec![0.2, 0.0, 0.3]);
/// ```
pub fn strip_padding(values: &[f64]) -> Vec<f64> {
    let end = values
        .iter()
        .rposition(|&v| v != 0.0)
        .map_or(0, |pos| pos + 1);
    values[..end].to_vec()
}

/// Fixed seven decimals with trailing zeros removed.
///
/// ```
/// use codas::libs::table::format_float;
/// assert_eq!(format_float(0.1 + 0.2), "0.3");
/// assert_eq!(format_float(2.0), "2");
/// assert_eq!(format_float(0.12345678), "0.1234568");
/// ```
pub fn format_float(value: f64) -> String {
    let s = format!("{:.7}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
