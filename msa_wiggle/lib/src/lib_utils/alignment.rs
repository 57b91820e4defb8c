/*
    Read an alignment into ordered records
        ";" or "#" lines are comments, anywhere in the file
        ">" starts a record, the rest of the line trimmed is the id
        a record with an empty id is dropped together with its residues
        any other line is appended to the open record, line-terminal whitespace removed
    Length check
        every record should carry as many residues as the first one
*/

use std::io::BufRead;
use std::path::Path;
use log::{debug, info, warn};
use super::errors::Result;
use super::struct_helper::FileBufferHelper;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    // one entry per character, no line breaks
    pub residues: Vec<char>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, residues: &str) -> Self {
        Self {
            id: id.into(),
            residues: residues.chars().collect(),
        }
    }

    pub fn sequence(&self) -> String {
        self.residues.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

// records in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    pub records: Vec<SequenceRecord>,
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';') || line.starts_with('#')
}

pub fn read_alignment(file: &Path) -> Result<Alignment> {
    info!("Reading alignment {:?}", file);
    let mut helper = FileBufferHelper::open(file)?;
    parse_alignment(&mut helper)
}

pub fn parse_alignment<R: BufRead>(file: &mut FileBufferHelper<R>) -> Result<Alignment> {
    let mut records: Vec<SequenceRecord> = Vec::new();
    let mut current: Option<SequenceRecord> = None;
    let mut orphan_lines = 0usize;
    let mut unnamed = 0usize;
    while file.next_line()? {
        let line = file.line.as_str();
        if is_comment(line) {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            finalise(&mut records, current.take(), &mut unnamed);
            current = Some(SequenceRecord::new(header.trim(), ""));
            continue;
        }
        let residues = line.trim_end();
        match current.as_mut() {
            Some(record) => record.residues.extend(residues.chars()),
            None if !residues.is_empty() => orphan_lines += 1,
            None => {}
        }
    }
    finalise(&mut records, current.take(), &mut unnamed);
    if unnamed > 0 {
        warn!("Dropped {} records with an empty identifier in {:?}", unnamed, file.path);
    }
    if orphan_lines > 0 {
        warn!("Ignored {} sequence lines before the first header in {:?}", orphan_lines, file.path);
    }
    debug!("Parsed {} records from {:?}", records.len(), file.path);
    Ok(Alignment { records })
}

fn finalise(records: &mut Vec<SequenceRecord>, done: Option<SequenceRecord>, unnamed: &mut usize) {
    match done {
        Some(record) if record.id.is_empty() => *unnamed += 1,
        Some(record) => records.push(record),
        None => {}
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LengthReport {
    // length of the first record
    pub expected: usize,
    // (id, length) of every record that differs from `expected`
    pub ragged: Vec<(String, usize)>,
}

impl LengthReport {
    pub fn is_consistent(&self) -> bool {
        self.ragged.is_empty()
    }
}

pub fn check_lengths(alignment: &Alignment) -> LengthReport {
    let expected = alignment.records.first().map_or(0, SequenceRecord::len);
    let ragged = alignment
        .records
        .iter()
        .filter(|record| record.len() != expected)
        .map(|record| (record.id.clone(), record.len()))
        .collect();
    LengthReport { expected, ragged }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Alignment {
        let mut helper = FileBufferHelper::from_reader("mem", Cursor::new(text.to_string()));
        parse_alignment(&mut helper).unwrap()
    }

    #[test]
    fn multiline_records_are_joined() {
        let alignment = parse(">ref desc\nAC-\nGT\n>c1\nAT-GA");
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.records[0], SequenceRecord::new("ref desc", "AC-GT"));
        assert_eq!(alignment.records[1], SequenceRecord::new("c1", "AT-GA"));
    }

    #[test]
    fn comments_are_skipped_inside_records() {
        let alignment = parse("# header comment\n>ref\nAC\n; note\n#more\nGT\n>c1\nACGT\n");
        assert_eq!(alignment.records[0].sequence(), "ACGT");
        assert_eq!(alignment.records[1].sequence(), "ACGT");
    }

    #[test]
    fn header_whitespace_and_crlf_are_trimmed() {
        let alignment = parse(">  ref one  \r\nACG \r\nT\r\n");
        assert_eq!(alignment.records[0].id, "ref one");
        assert_eq!(alignment.records[0].sequence(), "ACGT");
    }

    #[test]
    fn residues_are_counted_as_characters() {
        let alignment = parse(">ref\nAé \n>c1\nA C\n");
        assert_eq!(alignment.records[0].len(), 2);
        assert_eq!(alignment.records[1].residues, vec!['A', ' ', 'C']);
    }

    #[test]
    fn unnamed_records_are_dropped_with_their_residues() {
        let alignment = parse(">\nTTTT\n>ref\nACGT\n>  \nGGGG\n");
        assert_eq!(alignment.len(), 1);
        assert_eq!(alignment.records[0], SequenceRecord::new("ref", "ACGT"));
    }

    #[test]
    fn no_headers_gives_empty_alignment() {
        assert!(parse("ACGT\nACGT\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn header_without_residues_is_kept() {
        let alignment = parse(">a\n>b\nAC\n");
        assert_eq!(alignment.len(), 2);
        assert!(alignment.records[0].is_empty());
    }

    #[test]
    fn length_check_lists_ragged_records() {
        let alignment = parse(">a\nACGT\n>b\nAC\n>c\nACGT\n");
        let report = check_lengths(&alignment);
        assert_eq!(report.expected, 4);
        assert_eq!(report.ragged, vec![("b".to_string(), 2)]);
        assert!(!report.is_consistent());
        assert!(check_lengths(&parse(">a\nAC\n>b\nGT\n")).is_consistent());
    }
}
