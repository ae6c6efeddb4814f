//! Buffered source reader with a fixed capacity and a byte counter.
//!
//! The loader reports how many bytes a scan consumed; counting here keeps that
//! out of the CSV parsing loop.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

pub struct CountingBufReader<R: Read> {
    inner: BufReader<R>,
    bytes_read: u64,
}

impl<R: Read> CountingBufReader<R> {
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), reader),
            bytes_read: 0,
        }
    }

    /// Total bytes handed out to callers so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl<R: Read> Read for CountingBufReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl<R: Read> BufRead for CountingBufReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.bytes_read += amt as u64;
        self.inner.consume(amt)
    }
}

/// Open `path` behind a counting reader of `cap` bytes.
pub fn counting_from_path<P: AsRef<Path>>(
    path: P,
    cap: usize,
) -> io::Result<CountingBufReader<File>> {
    let file = File::open(path)?;
    Ok(CountingBufReader::with_capacity(cap, file))
}
