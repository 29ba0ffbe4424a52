/// Not enough room left in a [`Writer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WriteOverflow {
  /// Total size of the underlying buffer
  pub capacity: usize,
  /// Position the write would have needed to reach
  pub needed: usize,
}

/// A writer over a caller-owned byte slice
///
/// The slice is never grown; a write that would run past its end
/// fails with [`WriteOverflow`] and writes nothing.
///
/// ```
/// use sncoap_common::{WriteOverflow, Writer};
///
/// let mut buf = [0u8; 4];
/// let mut w = Writer::new(&mut buf);
///
/// w.write_u8(0x40).unwrap();
/// w.write_bytes(&[1, 2]).unwrap();
/// assert_eq!(w.position(), 3);
/// assert_eq!(w.remaining_capacity(), 1);
///
/// assert_eq!(w.write_bytes(&[3, 4]),
///            Err(WriteOverflow { capacity: 4,
///                                needed: 5 }));
/// assert_eq!(w.written(), &[0x40, 1, 2]);
/// ```
#[derive(Debug)]
pub struct Writer<'a> {
  buf: &'a mut [u8],
  pos: usize,
}

impl<'a> Writer<'a> {
  /// Start writing at the beginning of `buf`
  pub fn new(buf: &'a mut [u8]) -> Self {
    Self { buf, pos: 0 }
  }

  /// Write a single byte
  pub fn write_u8(&mut self, b: u8) -> Result<(), WriteOverflow> {
    self.write_bytes(&[b])
  }

  /// Write a `u16` in network byte order
  pub fn write_u16_be(&mut self, n: u16) -> Result<(), WriteOverflow> {
    self.write_bytes(&n.to_be_bytes())
  }

  /// Write a slice of bytes
  pub fn write_bytes(&mut self, bs: &[u8]) -> Result<(), WriteOverflow> {
    let end = self.pos + bs.len();
    if end > self.buf.len() {
      return Err(WriteOverflow { capacity: self.buf.len(),
                                 needed: end });
    }

    self.buf[self.pos..end].copy_from_slice(bs);
    self.pos = end;
    Ok(())
  }

  /// Number of bytes that can still be written
  pub fn remaining_capacity(&self) -> usize {
    self.buf.len() - self.pos
  }

  /// Number of bytes written so far
  pub fn position(&self) -> usize {
    self.pos
  }

  /// The bytes written so far
  pub fn written(&self) -> &[u8] {
    &self.buf[..self.pos]
  }
}
