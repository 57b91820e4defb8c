// error type shared by every stage of the pipeline

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WiggleError>;

#[derive(Error, Debug)]
pub enum WiggleError {
    #[error("parse: unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("entropy computation: ragged alignment, {record_id} has {record_len} residues \
             but the reference has {reference_len} (column {index})")]
    RaggedAlignment {
        record_id: String,
        record_len: usize,
        reference_len: usize,
        index: usize,
    },

    #[error("write: unable to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("de-interleave: unable to read temporary file {path:?}: {source}")]
    TempRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("de-interleave: malformed temporary file {path:?}: {reason}")]
    MalformedTemp { path: PathBuf, reason: String },
}

// pipeline stage a WiggleError was raised from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Parse,
    EntropyComputation,
    Write,
    Deinterleave,
}

impl WiggleError {
    pub fn stage(&self) -> Stage {
        match self {
            WiggleError::Read { .. } => Stage::Parse,
            WiggleError::RaggedAlignment { .. } => Stage::EntropyComputation,
            WiggleError::Write { .. } => Stage::Write,
            WiggleError::TempRead { .. } | WiggleError::MalformedTemp { .. } => Stage::Deinterleave,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parse => "parse",
            Stage::EntropyComputation => "entropy-computation",
            Stage::Write => "write",
            Stage::Deinterleave => "de-interleave",
        };
        f.write_str(name)
    }
}
