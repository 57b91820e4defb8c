/*
    Walk the alignment column by column
        skip columns where the reference holds a gap notation
        coordinate = column index - skipped columns before it
        score = scaled Shannon entropy of the column, unknown notations removed
*/

use std::fmt;
use log::{debug, trace, warn};
use super::errors::{Result, WiggleError};
use super::reference::ReferenceSplit;

pub const GAP_NOTATIONS: [char; 4] = ['_', '.', '~', '-'];
pub const UNKNOWN_NOTATIONS: [char; 2] = ['n', 'N'];
pub const DEFAULT_SCALE: f64 = 100.0;

pub fn is_gap(notation: char) -> bool {
    GAP_NOTATIONS.contains(&notation)
}

pub fn is_unknown(notation: char) -> bool {
    UNKNOWN_NOTATIONS.contains(&notation)
}

// scaled Shannon entropy, -scale * sum(p log2 p)
// terms are summed in the order notations are first seen
// an empty column scores 0.0, negative noise is clamped to 0.0
pub fn entropy(notations: &[char], scale: f64) -> f64 {
    if notations.is_empty() {
        return 0.0;
    }
    let mut counts: Vec<(char, u32)> = Vec::new();
    for &n in notations {
        match counts.iter_mut().find(|(seen, _)| *seen == n) {
            Some((_, count)) => *count += 1,
            None => counts.push((n, 1)),
        }
    }
    let total = notations.len() as f64;
    let sum: f64 = counts
        .iter()
        .map(|&(_, count)| {
            let p = f64::from(count) / total;
            p * (p.ln() / 2f64.ln())
        })
        .sum(); // sum (plogp) where p = N/sum
    let ent = -scale * sum;
    if ent > 0.0 {
        ent
    } else {
        0.0
    }
}

// track value as plain decimal, always with a fractional part
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Score(pub f64);

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        if text.contains('.') || !self.0.is_finite() {
            f.write_str(&text)
        } else {
            write!(f, "{}.0", text)
        }
    }
}

pub struct AdmittedColumn<'c> {
    pub index: usize,
    pub coordinate: usize,
    pub score: f64,
    // reference notation followed by each companion's, unfiltered
    pub notations: &'c [char],
}

impl AdmittedColumn<'_> {
    pub fn track_line(&self) -> String {
        format!("{} {}", self.coordinate, Score(self.score))
    }
}

pub struct ColumnEngine<'a> {
    split: &'a ReferenceSplit,
    scale: f64,
    index: usize,
    skipped: usize,
    admitted: usize,
    column: Vec<char>,
    filtered: Vec<char>,
}

impl<'a> ColumnEngine<'a> {
    pub fn new(split: &'a ReferenceSplit, scale: f64) -> Self {
        let reference_len = split.reference.len();
        for companion in split.companions.iter().filter(|c| c.len() > reference_len) {
            warn!("{} has {} residues, the reference {} has {}; extra columns are ignored",
                companion.id, companion.len(), split.reference.id, reference_len);
        }
        let gapless = split.reference.residues.iter().filter(|&&n| !is_gap(n)).count();
        debug!("Reference {} spans {} columns, {} without gaps",
            split.reference.id, reference_len, gapless);
        Self {
            split,
            scale,
            index: 0,
            skipped: 0,
            admitted: 0,
            column: Vec::with_capacity(split.record_count()),
            filtered: Vec::with_capacity(split.record_count()),
        }
    }

    // columns admitted so far
    pub fn admitted(&self) -> usize {
        self.admitted
    }

    // index of the next column to visit
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn next_column(&mut self) -> Result<Option<AdmittedColumn<'_>>> {
        let split = self.split;
        let reference = &split.reference;
        while self.index < reference.len() {
            let i = self.index;
            self.index += 1;
            let notation = reference.residues[i];
            if is_gap(notation) {
                self.skipped += 1;
                continue;
            }
            self.column.clear();
            self.column.push(notation);
            for companion in &split.companions {
                let residue = companion.residues.get(i).copied().ok_or_else(|| {
                    WiggleError::RaggedAlignment {
                        record_id: companion.id.clone(),
                        record_len: companion.len(),
                        reference_len: reference.len(),
                        index: i,
                    }
                })?;
                self.column.push(residue);
            }
            self.filtered.clear();
            self.filtered.extend(self.column.iter().copied().filter(|&n| !is_unknown(n)));
            let score = entropy(&self.filtered, self.scale);
            self.admitted += 1;
            trace!("Column {} -> coordinate {} score {}", i, i - self.skipped, score);
            return Ok(Some(AdmittedColumn {
                index: i,
                coordinate: i - self.skipped,
                score,
                notations: &self.column,
            }));
        }
        Ok(None)
    }
}
