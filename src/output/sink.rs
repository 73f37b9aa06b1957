use std::io::{self, Write};

/// Pass-through writer that counts the bytes accepted by the inner writer.
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_parts(self) -> (W, u64) {
        (self.inner, self.written)
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_write() {
        let mut w = CountingWriter::new(Vec::new());
        w.write_all(b"hello ").unwrap();
        write!(w, "{}", "world").unwrap();
        assert_eq!(w.written(), 11);
        let (buf, n) = w.into_parts();
        assert_eq!(buf.len() as u64, n);
    }
}
