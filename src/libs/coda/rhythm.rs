//! Canonical coda-type codes for the rhythm labels used in annotated recordings.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Code of labels that carry no rhythm class (`*-NOISE` and anything unknown)
pub const UNCLASSIFIED: i32 = -1;

lazy_static! {
    static ref RHYTHM_CODES: HashMap<&'static str, i32> = {
        let mut m = HashMap::new();
        m.insert("3D", 0);
        m.insert("3R", 1);
        m.insert("4D", 2);
        m.insert("4R1", 3);
        m.insert("4R2", 3);
        m.insert("1+31", 4);
        m.insert("1+32", 4);
        m.insert("1+1+3", 5);
        m.insert("5R1", 6);
        m.insert("5R2", 6);
        m.insert("5R3", 6);
        m.insert("2+3", 7);
        m.insert("6R", 8);
        m.insert("6i", 9);
        m.insert("7D1", 10);
        m.insert("7D2", 10);
        m.insert("7R", 10);
        m.insert("7i", 11);
        m.insert("8D", 12);
        m.insert("8R", 12);
        m.insert("8i", 13);
        m.insert("9R", 14);
        m.insert("9i", 15);
        m.insert("10R", 16);
        m.insert("10i", 17);
        for label in NOISE_LABELS {
            m.insert(label, UNCLASSIFIED);
        }
        m
    };
}

const NOISE_LABELS: [&str; 10] = [
    "1-NOISE", "2-NOISE", "3-NOISE", "4-NOISE", "5-NOISE", "6-NOISE", "7-NOISE", "8-NOISE",
    "9-NOISE", "10-NOISE",
];

/// Map a rhythm label to its coda-type code.
///
/// ```
/// use codas::libs::coda::rhythm;
/// assert_eq!(rhythm::code_of("5R2"), 6);
/// assert_eq!(rhythm::code_of("4-NOISE"), -1);
/// assert_eq!(rhythm::code_of("unknown"), -1);
/// ```
pub fn code_of(label: &str) -> i32 {
    RHYTHM_CODES
        .get(label.trim())
        .copied()
        .unwrap_or(UNCLASSIFIED)
}

/// Whether the label is one of the enumerated rhythm labels, noise labels included
pub fn is_known(label: &str) -> bool {
    RHYTHM_CODES.contains_key(label.trim())
}
