// structs to handle file buffers


use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use log::debug;
use super::errors::{Result, WiggleError};

pub struct FileBufferHelper<R> {
    pub path: PathBuf,
    pub buffer_reader: R,
    pub line: String,
}

impl FileBufferHelper<BufReader<File>> {
    pub fn open(file: &Path) -> Result<Self> {
        let file_open = File::open(file).map_err(|source| WiggleError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        debug!("FileHelper created for: {:?}", file);
        Ok(Self::from_reader(file, BufReader::new(file_open)))
    }
}

impl<R: BufRead> FileBufferHelper<R> {
    pub fn from_reader(label: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: label.into(),
            buffer_reader: reader,
            line: String::new(),
        }
    }

    // clear the line buffer and read the next line into it
    // false once the stream is exhausted
    pub fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        match self.buffer_reader.read_line(&mut self.line) {
            Ok(read) => Ok(read > 0),
            Err(source) => Err(WiggleError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

pub struct OutputHelper<W: Write> {
    pub path: PathBuf,
    writer: BufWriter<W>,
}

impl OutputHelper<File> {
    pub fn create(file: &Path) -> Result<Self> {
        let file_create = File::create(file).map_err(|source| WiggleError::Write {
            path: file.to_path_buf(),
            source,
        })?;
        debug!("Output created: {:?}", file);
        Ok(Self::from_writer(file, file_create))
    }
}

impl<W: Write> OutputHelper<W> {
    pub fn from_writer(label: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            path: label.into(),
            writer: BufWriter::new(writer),
        }
    }

    fn wrap(&self, source: std::io::Error) -> WiggleError {
        WiggleError::Write {
            path: self.path.clone(),
            source,
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|e| self.wrap(e))
    }

    pub fn write_chars(&mut self, chars: &[char]) -> Result<()> {
        let mut encoded = [0u8; 4];
        for c in chars {
            self.write_bytes(c.encode_utf8(&mut encoded).as_bytes())?;
        }
        Ok(())
    }

    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())?;
        self.write_bytes(b"\n")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.wrap(e))
    }

    // flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        let path = self.path.clone();
        self.writer.into_inner().map_err(|e| WiggleError::Write {
            path,
            source: e.into_error(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn next_line_walks_the_stream() {
        let mut helper = FileBufferHelper::from_reader("mem", Cursor::new(">a\nAC"));
        assert!(helper.next_line().unwrap());
        assert_eq!(helper.line, ">a\n");
        assert!(helper.next_line().unwrap());
        assert_eq!(helper.line, "AC");
        assert!(!helper.next_line().unwrap());
        assert!(helper.line.is_empty());
    }

    #[test]
    fn output_helper_returns_written_bytes() {
        let mut out = OutputHelper::from_writer("mem", Vec::new());
        out.write_line(">ref").unwrap();
        out.write_bytes(b"ACGT").unwrap();
        assert_eq!(out.finish().unwrap(), b">ref\nACGT".to_vec());
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let err = FileBufferHelper::open(Path::new("/definitely/not/here.afa")).err().unwrap();
        assert!(matches!(err, WiggleError::Read { .. }));
    }
}
