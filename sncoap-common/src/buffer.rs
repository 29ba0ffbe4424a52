use toad_array::{AppendCopy, Array, Indexed, Reserve};
use toad_len::Len;

/// A storage strategy was asked to hold more bytes than it can
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllocError {
  /// Number of bytes the buffer would have needed to hold
  pub requested: usize,
  /// Number of bytes the buffer is able to hold
  pub capacity: usize,
}

/// Byte storage that messages are generic over.
///
/// Anything that is a [`toad_array::Array`] of bytes and can copy from
/// slices is a `Buffer`, so both of these work out of the box:
/// - `Vec<u8>` (feature `alloc`) grows on the heap and never fails
/// - `tinyvec::ArrayVec<[u8; N]>` lives inline and fails once `N` bytes are held
///
/// `Array`'s own `push` / `append_copy` panic when an `ArrayVec` is full;
/// the methods here check [`Len::CAPACITY`] first and yield [`AllocError`]
/// instead.
///
/// ```
/// use sncoap_common::{AllocError, Buffer};
/// use tinyvec::ArrayVec;
///
/// let small = ArrayVec::<[u8; 2]>::try_copy_from(b"ab").unwrap();
/// assert_eq!(&*small, b"ab");
///
/// assert_eq!(ArrayVec::<[u8; 2]>::try_copy_from(b"abc"),
///            Err(AllocError { requested: 3,
///                             capacity: 2 }));
/// ```
pub trait Buffer: Array<Item = u8> + AppendCopy<u8> + Clone {
  /// Check that `n` bytes fit within [`Len::CAPACITY`]
  fn check_capacity(n: usize) -> Result<(), AllocError> {
    match <Self as Len>::CAPACITY {
      | Some(capacity) if n > capacity => Err(AllocError { requested: n,
                                                           capacity }),
      | _ => Ok(()),
    }
  }

  /// Create an empty buffer with room for at least `n` bytes.
  fn with_room_for(n: usize) -> Result<Self, AllocError> {
    Self::check_capacity(n)?;
    Ok(<Self as Reserve>::reserve(n))
  }

  /// Append a single byte
  fn push_byte(&mut self, byte: u8) -> Result<(), AllocError> {
    Self::check_capacity(Len::len(self) + 1)?;
    Indexed::append(self, byte);
    Ok(())
  }

  /// Append a slice of bytes; on failure the buffer is unchanged.
  fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
    Self::check_capacity(Len::len(self) + bytes.len())?;
    self.append_copy(bytes);
    Ok(())
  }

  /// Create a buffer holding a copy of `bytes`
  fn try_copy_from(bytes: &[u8]) -> Result<Self, AllocError> {
    let mut buf = Self::with_room_for(bytes.len())?;
    buf.append_bytes(bytes)?;
    Ok(buf)
  }
}

impl<T> Buffer for T where T: Array<Item = u8> + AppendCopy<u8> + Clone {}
