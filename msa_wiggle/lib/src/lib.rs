/*
    Turn a multiple sequence alignment into
        a gapless alignment restricted to the columns where the reference holds a residue
        a variableStep wiggle track of the scaled Shannon entropy at each of those columns

    Reader -> reference selection -> column entropy -> writer
        in-memory writer: one buffer per record, alignment written at the end
        streaming writer: columns written to an interleaved temporary file,
                          then de-interleaved into the alignment output
*/


use std::path::{Path, PathBuf};
use log::{info, warn};
pub mod lib_utils;
use lib_utils::alignment::read_alignment;
use lib_utils::deinterleave::deinterleave_file;
use lib_utils::reference::{select_reference, ReferenceSplit};
use lib_utils::streaming::write_streaming;
use lib_utils::struct_helper::OutputHelper;
use lib_utils::track_writer::write_in_memory;

pub use lib_utils::errors::{Result, Stage, WiggleError};
pub use lib_utils::WiggleOptions;

fn load_reference(msa_file: &Path, seq_id: &str) -> Result<Option<ReferenceSplit>> {
    let alignment = read_alignment(msa_file)?;
    info!("{} records read from {:?}", alignment.len(), msa_file);
    let split = select_reference(alignment, seq_id);
    if split.is_none() {
        warn!("Reference {:?} not found in {:?}, nothing written", seq_id, msa_file);
    }
    Ok(split)
}

// gapless alignment and entropy track, built in memory
// returns the number of columns kept, 0 when no record id starts with seq_id
// (no output file is created in that case)
pub fn msa_to_wiggle(
    msa_file: &Path,
    seq_id: &str,
    msa_output: &Path,
    wig_output: &Path,
    options: &WiggleOptions,
) -> Result<usize> {
    let split = match load_reference(msa_file, seq_id)? {
        Some(split) => split,
        None => return Ok(0),
    };
    let mut msa = OutputHelper::create(msa_output)?;
    let mut wig = OutputHelper::create(wig_output)?;
    let count = write_in_memory(&split, &mut msa, &mut wig, options)?;
    msa.finish()?;
    wig.finish()?;
    Ok(count)
}

// first half of the streaming path: entropy track plus interleaved temporary file
pub fn msa_to_wiggle_streaming(
    msa_file: &Path,
    seq_id: &str,
    wig_output: &Path,
    temp_output: &Path,
    options: &WiggleOptions,
) -> Result<usize> {
    let split = match load_reference(msa_file, seq_id)? {
        Some(split) => split,
        None => return Ok(0),
    };
    stream_split(&split, wig_output, temp_output, options)
}

fn stream_split(
    split: &ReferenceSplit,
    wig_output: &Path,
    temp_output: &Path,
    options: &WiggleOptions,
) -> Result<usize> {
    let mut temp = OutputHelper::create(temp_output)?;
    let mut wig = OutputHelper::create(wig_output)?;
    let count = write_streaming(split, &mut temp, &mut wig, options)?;
    temp.finish()?;
    wig.finish()?;
    Ok(count)
}

// streaming path end to end: track and temporary file, then the alignment
// rebuilt from the temporary file, which is removed afterwards
pub fn msa_to_wiggle_low_memory(
    msa_file: &Path,
    seq_id: &str,
    msa_output: &Path,
    wig_output: &Path,
    temp_output: &Path,
    options: &WiggleOptions,
) -> Result<usize> {
    let split = match load_reference(msa_file, seq_id)? {
        Some(split) => split,
        None => return Ok(0),
    };
    let records = split.record_count();
    let count = stream_split(&split, wig_output, temp_output, options)?;
    drop(split);
    deinterleave_file(temp_output, msa_output, Some(records))?;
    Ok(count)
}

// hidden sibling of the alignment output, dir/.name.temp
pub fn default_temp_path(msa_output: &Path) -> PathBuf {
    let name = msa_output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "msa".to_string());
    msa_output.with_file_name(format!(".{}.temp", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_sits_next_to_the_output() {
        assert_eq!(default_temp_path(Path::new("out/msa.afa")), PathBuf::from("out/.msa.afa.temp"));
        assert_eq!(default_temp_path(Path::new("msa.afa")), PathBuf::from(".msa.afa.temp"));
    }
}
