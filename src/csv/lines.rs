use std::io::{self, Read};

/// A [Read] adapter that remembers where every line break in the stream is.
///
/// The csv parser drops blank lines without counting them, so its own line
/// numbers drift after the first blank line. Byte offsets stay exact, and
/// [LineTracker::line_at] turns one back into a 1-based physical line.
pub(crate) struct LineTracker<R> {
    inner: R,
    offset: u64,
    newlines: Vec<u64>,
}

impl<R: Read> LineTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            newlines: Vec::new(),
        }
    }
}

impl<R> LineTracker<R> {
    /// Physical line holding byte `offset`.
    ///
    /// Only valid for offsets already read through the tracker.
    pub(crate) fn line_at(&self, offset: u64) -> usize {
        self.newlines.partition_point(|&newline| newline < offset) + 1
    }
}

impl<R: Read> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        let start = self.offset;
        self.newlines.extend(
            buf[..read]
                .iter()
                .enumerate()
                .filter(|(_, byte)| **byte == b'\n')
                .map(|(i, _)| start + i as u64),
        );
        self.offset += read as u64;
        Ok(read)
    }
}
