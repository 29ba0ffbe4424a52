use tinyvec::ArrayVec;

use crate::opt::{decode_uint, encode_uint};

/// Three items of information may need to be transferred in a
/// Block (Block1 or Block2) option:
/// * the size of the block ([`Block::size`])
/// * whether more blocks are following ([`Block::more`])
/// * the relative number of the block ([`Block::num`]) within a sequence of blocks with the given size.
///
/// On the wire a block is a 1 to 3 byte unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block(u32);

impl Block {
  /// Largest value that fits in the 3 bytes a block option may occupy
  pub const MAX: u32 = 0x00FF_FFFF;

  /// Create a block description.
  ///
  /// `size` is clamped to `16..=1024` and rounded down to a power of two.
  pub fn new(size: u16, num: u32, more: bool) -> Self {
    let num = num << 4;
    let more = u32::from(more) << 3;
    let size = size.clamp(16, 1024);
    let szx = (15 - size.leading_zeros()) - 4;

    Self(num | more | szx)
  }

  #[allow(missing_docs)]
  pub fn size(&self) -> u16 {
    let szx = (self.0 & 0b111).min(6);
    2u16.pow(szx + 4)
  }

  #[allow(missing_docs)]
  pub fn more(&self) -> bool {
    (self.0 & 0b1000) >> 3 == 1
  }

  #[allow(missing_docs)]
  pub fn num(&self) -> u32 {
    self.0 >> 4
  }

  /// Wire representation; always at least 1 byte.
  ///
  /// Returns `None` if the block number does not fit in 3 bytes.
  ///
  /// ```
  /// use sncoap_msg::Block;
  ///
  /// assert_eq!(Block::new(16, 0, false).to_bytes().unwrap().as_slice(), &[0]);
  /// assert_eq!(Block::new(64, 0, true).to_bytes().unwrap().as_slice(), &[0b1010]);
  /// assert_eq!(Block::new(1024, 16, false).to_bytes().unwrap().as_slice(), &[1, 6]);
  /// ```
  pub fn to_bytes(&self) -> Option<ArrayVec<[u8; 4]>> {
    match self.0 {
      | 0 => Some(tinyvec::array_vec!([u8; 4] => 0)),
      | n if n <= Self::MAX => Some(encode_uint(n)),
      | _ => None,
    }
  }

  /// Read a block from its wire representation
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    match bytes.len() {
      | 0..=3 => decode_uint(bytes).map(Block),
      | _ => None,
    }
  }
}

impl From<Block> for u32 {
  fn from(b: Block) -> Self {
    b.0
  }
}

impl From<u32> for Block {
  fn from(n: u32) -> Self {
    Block(n)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn block() {
    let b = Block(33);
    assert_eq!(b.size(), 32);
    assert_eq!(b.num(), 2);
    assert_eq!(b.more(), false);

    let b = Block(59);
    assert_eq!(b.size(), 128);
    assert_eq!(b.num(), 3);
    assert_eq!(b.more(), true);

    assert_eq!(Block::new(32, 2, false), Block(33));
    assert_eq!(Block::new(128, 3, true), Block(59));
  }

  #[test]
  fn size_rounds_down_to_nearest_power_of_two() {
    assert_eq!(Block::new(0, 1, false).size(), 16);
    assert_eq!(Block::new(10, 1, false).size(), 16);
    assert_eq!(Block::new(17, 1, false).size(), 16);
    assert_eq!(Block::new(31, 1, false).size(), 16);
    assert_eq!(Block::new(33, 1, false).size(), 32);
    assert_eq!(Block::new(64, 1, false).size(), 64);
    assert_eq!(Block::new(1000, 1, false).size(), 512);
    assert_eq!(Block::new(1024, 1, false).size(), 1024);
    assert_eq!(Block::new(2048, 1, false).size(), 1024);
  }

  #[test]
  fn bytes() {
    assert_eq!(Block::from_bytes(&[]), Some(Block(0)));
    assert_eq!(Block::from_bytes(&[0x01, 0x02, 0x03]), Some(Block(0x010203)));
    assert_eq!(Block::from_bytes(&[0, 0, 0, 1]), None);
    assert_eq!(Block(Block::MAX + 1).to_bytes(), None);
    assert_eq!(Block(Block::MAX).to_bytes().unwrap().as_slice(),
               &[0xFF, 0xFF, 0xFF]);
  }
}
