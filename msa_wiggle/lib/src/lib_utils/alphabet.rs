// nucleotide or protein, judged from a sample of residue characters

use std::collections::BTreeSet;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use log::debug;
use super::errors::Result;
use super::struct_helper::FileBufferHelper;

pub const NUCLEOTIDE_NOTATIONS: &str = "ACTGN";
pub const SAMPLE_LEN: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceKind {
    Nucleotide,
    Protein,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Nucleotide => write!(f, "nucleotide"),
            SequenceKind::Protein => write!(f, "protein"),
        }
    }
}

pub fn classify_alignment_file(file: &Path) -> Result<SequenceKind> {
    let mut helper = FileBufferHelper::open(file)?;
    classify(&mut helper)
}

pub fn classify<R: BufRead>(file: &mut FileBufferHelper<R>) -> Result<SequenceKind> {
    let mut sample = String::new();
    while file.next_line()? {
        let line = file.line.as_str();
        if line.starts_with('>') || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        sample.extend(line.trim().chars().take(SAMPLE_LEN).map(|c| c.to_ascii_uppercase()));
        if sample.chars().count() >= SAMPLE_LEN {
            break;
        }
    }
    let notations: BTreeSet<char> = sample.chars().collect();
    debug!("Sampled notations in {:?}: {:?}", file.path, notations);
    Ok(classify_notations(&notations))
}

fn classify_notations(notations: &BTreeSet<char>) -> SequenceKind {
    if notations.len() <= NUCLEOTIDE_NOTATIONS.len()
        && notations.iter().all(|c| NUCLEOTIDE_NOTATIONS.contains(*c))
    {
        SequenceKind::Nucleotide
    } else {
        SequenceKind::Protein
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn kind(text: &str) -> SequenceKind {
        let mut helper = FileBufferHelper::from_reader("mem", Cursor::new(text.to_string()));
        classify(&mut helper).unwrap()
    }

    #[test]
    fn dna_is_nucleotide_in_any_case() {
        assert_eq!(kind(">a\nacgtn\n# ignored PQRS\n>b\nACGT\n"), SequenceKind::Nucleotide);
    }

    #[test]
    fn amino_acids_are_protein() {
        assert_eq!(kind(">p\nMKVLAAGIVG\n"), SequenceKind::Protein);
    }

    #[test]
    fn gaps_count_as_foreign_notations() {
        assert_eq!(kind(">a\nAC-GT\n"), SequenceKind::Protein);
    }

    #[test]
    fn empty_sample_is_nucleotide() {
        assert_eq!(kind(">only\n"), SequenceKind::Nucleotide);
    }

    #[test]
    fn only_the_sample_is_inspected() {
        let text = format!(">a\n{}\n>b\nPPPP\n", "A".repeat(SAMPLE_LEN));
        assert_eq!(kind(&text), SequenceKind::Nucleotide);
    }
}
