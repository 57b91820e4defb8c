/*
    Streaming writer
        temporary file: one ">id" line per record (reference first), then every admitted
        column written left to right on a single line, no separators
        entropy track written as each column is scored
        both outputs flushed every `flush_interval` columns
*/

use std::io::Write;
use log::{debug, info, trace};
use super::entropy::ColumnEngine;
use super::errors::Result;
use super::reference::ReferenceSplit;
use super::struct_helper::OutputHelper;
use super::track_writer::track_header;
use super::WiggleOptions;

// returns the number of admitted columns
pub fn write_streaming<I: Write, T: Write>(
    split: &ReferenceSplit,
    interleaved: &mut OutputHelper<I>,
    wig: &mut OutputHelper<T>,
    options: &WiggleOptions,
) -> Result<usize> {
    wig.write_line(&track_header(&split.reference.id))?;
    for record in split.records() {
        interleaved.write_line(&format!(">{}", record.id))?;
    }
    debug!("Wrote {} headers to {:?}", split.record_count(), interleaved.path);
    let mut engine = ColumnEngine::new(split, options.scale);
    let mut next_flush = options.flush_interval;
    while let Some(column) = engine.next_column()? {
        interleaved.write_chars(column.notations)?;
        wig.write_line(&column.track_line())?;
        if options.flush_interval > 0 && column.index + 1 >= next_flush {
            trace!("Flushing outputs at column {}", column.index);
            next_flush = column.index + 1 + options.flush_interval;
            interleaved.flush()?;
            wig.flush()?;
        }
    }
    interleaved.flush()?;
    wig.flush()?;
    let count = engine.admitted();
    info!("{} columns streamed for {} records", count, split.record_count());
    Ok(count)
}
