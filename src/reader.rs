//! Reading candidates from an input stream.

use std::io::BufRead;

use crate::{SurferError, SurferOptions};

const READ_BUFFER_SIZE: usize = 1024;

/// Splits an input stream into candidate strings
#[derive(Debug, Clone)]
pub struct SurferItemReader {
    buf_size: usize,
    line_ending: u8,
}

impl Default for SurferItemReader {
    fn default() -> Self {
        Self {
            buf_size: READ_BUFFER_SIZE,
            line_ending: b'\n',
        }
    }
}

impl SurferItemReader {
    /// Creates a reader configured from surfer options
    pub fn from_options(options: &SurferOptions) -> Self {
        Self::default().line_ending(options.line_ending())
    }

    /// Sets the record separator
    pub fn line_ending(mut self, line_ending: u8) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets the initial capacity of the record buffer
    pub fn buf_size(mut self, buf_size: usize) -> Self {
        self.buf_size = buf_size;
        self
    }

    /// Reads every record of `source`.
    ///
    /// The separator is stripped, and so is a `\r` before a `\n` separator.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_items<R: BufRead>(&self, mut source: R) -> Result<Vec<String>, SurferError> {
        let mut items = Vec::new();
        let mut buffer = Vec::with_capacity(self.buf_size);

        loop {
            buffer.clear();
            if source.read_until(self.line_ending, &mut buffer)? == 0 {
                break;
            }
            if buffer.last() == Some(&self.line_ending) {
                buffer.pop();
                if self.line_ending == b'\n' && buffer.last() == Some(&b'\r') {
                    buffer.pop();
                }
            }
            items.push(String::from_utf8_lossy(&buffer).into_owned());
        }

        debug!("read {} items", items.len());
        Ok(items)
    }
}
