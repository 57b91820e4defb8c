/*
    In-memory writer
        grow one residue buffer per record while the column engine runs
        write the entropy track as columns are scored
        write the gapless alignment once every column is visited
*/

use std::io::Write;
use log::{info, trace};
use super::entropy::ColumnEngine;
use super::errors::Result;
use super::reference::ReferenceSplit;
use super::struct_helper::OutputHelper;
use super::WiggleOptions;

pub fn track_header(reference_id: &str) -> String {
    format!("variableStep chrom={}", reference_id)
}

// returns the number of admitted columns
pub fn write_in_memory<M: Write, T: Write>(
    split: &ReferenceSplit,
    msa: &mut OutputHelper<M>,
    wig: &mut OutputHelper<T>,
    options: &WiggleOptions,
) -> Result<usize> {
    wig.write_line(&track_header(&split.reference.id))?;
    // buffers keyed by record position: reference first, then companions
    let mut buffers: Vec<String> = split
        .records()
        .map(|_| String::with_capacity(split.reference.len()))
        .collect();
    let mut engine = ColumnEngine::new(split, options.scale);
    while let Some(column) = engine.next_column()? {
        for (buffer, &notation) in buffers.iter_mut().zip(column.notations) {
            buffer.push(notation);
        }
        wig.write_line(&column.track_line())?;
    }
    let count = engine.admitted();
    trace!("Column loop finished at index {}", engine.position());
    for (record, buffer) in split.records().zip(&buffers) {
        msa.write_line(&format!(">{}", record.id))?;
        msa.write_line(buffer)?;
    }
    msa.flush()?;
    wig.flush()?;
    info!("{} columns kept for {} records", count, buffers.len());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib_utils::alignment::SequenceRecord;
    use crate::lib_utils::errors::WiggleError;

    fn run(split: &ReferenceSplit) -> Result<(usize, String, String)> {
        let mut msa = OutputHelper::from_writer("msa", Vec::new());
        let mut wig = OutputHelper::from_writer("wig", Vec::new());
        let count = write_in_memory(split, &mut msa, &mut wig, &WiggleOptions::default())?;
        let msa = String::from_utf8(msa.finish()?).unwrap();
        let wig = String::from_utf8(wig.finish()?).unwrap();
        Ok((count, msa, wig))
    }

    #[test]
    fn worked_example() {
        let split = ReferenceSplit {
            reference: SequenceRecord::new("ref", "AC-GT"),
            companions: vec![SequenceRecord::new("c1", "AT-GA")],
        };
        let (count, msa, wig) = run(&split).unwrap();
        assert_eq!(count, 4);
        assert_eq!(msa, ">ref\nACGT\n>c1\nATGA\n");
        assert_eq!(wig, "variableStep chrom=ref\n0 0.0\n1 100.0\n2 0.0\n3 100.0\n");
    }

    #[test]
    fn duplicate_ids_keep_their_own_rows() {
        let split = ReferenceSplit {
            reference: SequenceRecord::new("ref", "AC"),
            companions: vec![
                SequenceRecord::new("dup", "GG"),
                SequenceRecord::new("dup", "TT"),
            ],
        };
        let (_, msa, _) = run(&split).unwrap();
        assert_eq!(msa, ">ref\nAC\n>dup\nGG\n>dup\nTT\n");
    }

    #[test]
    fn ragged_companion_stops_the_run() {
        let split = ReferenceSplit {
            reference: SequenceRecord::new("ref", "ACGT"),
            companions: vec![SequenceRecord::new("short", "AC")],
        };
        assert!(matches!(run(&split), Err(WiggleError::RaggedAlignment { .. })));
    }
}
