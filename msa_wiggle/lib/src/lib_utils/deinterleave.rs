/*
    Rebuild per-record sequences from the interleaved temporary file
        N header lines, then one line of columns flattened left to right
        record k owns every character at position j where j mod N == k
        one pass over the flattened line per record
    The temporary file is removed once the alignment is written.
*/

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use log::{debug, info, warn};
use super::errors::{Result, WiggleError};
use super::struct_helper::{FileBufferHelper, OutputHelper};

// returns the number of records written
pub fn deinterleave_file(temp: &Path, msa_output: &Path, expected_records: Option<usize>) -> Result<usize> {
    let mut reader = FileBufferHelper::open(temp).map_err(temp_read)?;
    let mut msa = OutputHelper::create(msa_output)?;
    let records = deinterleave(&mut reader, &mut msa, expected_records)?;
    msa.finish()?;
    fs::remove_file(temp).map_err(|source| WiggleError::Write {
        path: temp.to_path_buf(),
        source,
    })?;
    info!("Removed temporary file {:?}", temp);
    Ok(records)
}

pub fn deinterleave<R: BufRead, W: Write>(
    reader: &mut FileBufferHelper<R>,
    msa: &mut OutputHelper<W>,
    expected_records: Option<usize>,
) -> Result<usize> {
    let mut headers: Vec<String> = Vec::new();
    let mut flattened: Vec<char> = Vec::new();
    while reader.next_line().map_err(temp_read)? {
        let line = strip_terminator(&reader.line);
        if line.starts_with('>') {
            if !flattened.is_empty() {
                return Err(malformed(reader, "header found after the column data"));
            }
            headers.push(line.to_string());
        } else if !line.is_empty() {
            if !flattened.is_empty() {
                warn!("More than one data line in {:?}, keeping the last", reader.path);
            }
            flattened = line.chars().collect();
        }
    }
    let records = headers.len();
    if records == 0 {
        return Err(malformed(reader, "no header lines"));
    }
    if let Some(expected) = expected_records {
        if expected != records {
            return Err(malformed(reader, &format!("expected {} records, found {}", expected, records)));
        }
    }
    if flattened.len() % records != 0 {
        return Err(malformed(
            reader,
            &format!("{} characters do not split evenly across {} records", flattened.len(), records),
        ));
    }
    debug!("{} records of {} columns in {:?}", records, flattened.len() / records, reader.path);
    for (k, header) in headers.iter().enumerate() {
        let sequence: String = flattened.iter().skip(k).step_by(records).collect();
        msa.write_line(header)?;
        msa.write_line(&sequence)?;
    }
    Ok(records)
}

// data lines may end in whitespace residues, only the terminator goes
fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

fn temp_read(err: WiggleError) -> WiggleError {
    match err {
        WiggleError::Read { path, source } => WiggleError::TempRead { path, source },
        other => other,
    }
}

fn malformed<R>(reader: &FileBufferHelper<R>, reason: &str) -> WiggleError {
    WiggleError::MalformedTemp {
        path: reader.path.clone(),
        reason: reason.to_string(),
    }
}
