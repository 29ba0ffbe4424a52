use sncoap_common::{WriteOverflow, Writer};
use toad_cursor::Cursor;
use tinyvec::ArrayVec;
use toad_macros::rfc_7252_doc;

/// Known option numbers and typed option values
pub mod known;
pub use known::*;

/// Option parsing errors
pub mod parse_error;
pub use parse_error::*;

mod options;
pub use options::*;

mod parts;
pub use parts::*;

pub(crate) mod table;

/// Number of extension bytes needed to represent an option delta or
/// value length that does not fit in the 4-bit nibble of the option header.
///
/// ```text
///  0..=12   -> 0 (value is the nibble)
/// 13..=268  -> 1 (nibble 13, value - 13)
/// 269..     -> 2 (nibble 14, value - 269 big-endian)
/// ```
pub(crate) fn ext_size(n: usize) -> usize {
  match n {
    | n if n >= 269 => 2,
    | n if n >= 13 => 1,
    | _ => 0,
  }
}

/// Split a delta or length into the header nibble and its extension bytes
pub(crate) fn opt_len_or_delta(val: usize) -> (u8, ArrayVec<[u8; 2]>) {
  let mut bytes = ArrayVec::new();
  match val {
    | n if n >= 269 => {
      bytes.extend(((n - 269) as u16).to_be_bytes());
      (14, bytes)
    },
    | n if n >= 13 => {
      bytes.push((n - 13) as u8);
      (13, bytes)
    },
    | n => (n as u8, bytes),
  }
}

/// Write an option header: the delta/length byte, then the delta
/// extension, then the length extension.
pub(crate) fn write_opt_header(w: &mut Writer<'_>, delta: usize, len: usize) -> Result<(), WriteOverflow> {
  let (del, del_bytes) = opt_len_or_delta(delta);
  let (len, len_bytes) = opt_len_or_delta(len);

  w.write_u8(del << 4 | len)?;
  w.write_bytes(&del_bytes)?;
  w.write_bytes(&len_bytes)
}

/// Inverse of [`opt_len_or_delta`]; consumes any extension bytes from the cursor.
///
/// Delta **must** be consumed before length, since that is the order
/// their extension bytes appear in.
pub(crate) fn parse_opt_len_or_delta<A: AsRef<[u8]>>(head: u8,
                                                     bytes: &mut Cursor<A>,
                                                     reserved_err: OptParseError)
                                                     -> Result<u32, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(OptParseError::eof)?;
      Ok(n as u32 + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u16::from_be_bytes([a, b]) as u32 + 269),
      | _ => Err(OptParseError::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head as u32),
  }
}

/// Encode an unsigned integer option value in as few bytes as possible
/// (`0` encodes as no bytes at all).
///
/// ```
/// use sncoap_msg::opt::encode_uint;
///
/// assert_eq!(encode_uint(0).as_slice(), &[]);
/// assert_eq!(encode_uint(255).as_slice(), &[255]);
/// assert_eq!(encode_uint(256).as_slice(), &[1, 0]);
/// assert_eq!(encode_uint(0x01_00_00_00).as_slice(), &[1, 0, 0, 0]);
/// ```
pub fn encode_uint(n: u32) -> ArrayVec<[u8; 4]> {
  let skip = (n.leading_zeros() / 8) as usize;
  n.to_be_bytes()[skip..].iter().copied().collect()
}

/// Decode an unsigned integer option value; `None` if it is longer than 4 bytes.
pub fn decode_uint(bytes: &[u8]) -> Option<u32> {
  match bytes.len() {
    | 0..=4 => Some(bytes.iter().fold(0u32, |n, b| n << 8 | *b as u32)),
    | _ => None,
  }
}

#[doc = rfc_7252_doc!("5.4.6")]
/// <details><summary><b>RFC7252 Section 12.2 Core CoAP Option Numbers</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.2"))]
/// </details>
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

#[doc = rfc_7252_doc!("5.4.1")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionMustBeProcessed {
  /// This option must be processed,
  /// and a response that ignores it
  /// will be rejected.
  ///
  /// Corresponds to the option being "critical"
  /// in strict CoAP terms
  Yes,
  /// This option does not _need_ to
  /// be processed,
  /// and a response that ignores it
  /// will be processed anyway.
  ///
  /// Corresponds to the option being "elective"
  /// in strict CoAP terms
  No,
}

#[doc = rfc_7252_doc!("5.4.2")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionUnsupportedByProxy {
  /// This option /must be/ processed & understood by proxies
  /// and may not be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "UnSafe" to forward
  /// in strict CoAP terms
  Error,
  /// This option may not be processed & understood by proxies
  /// and may be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "SafeToForward"
  /// in strict CoAP terms
  Forward,
}

#[doc = rfc_7252_doc!("5.4.2")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionChanges {
  /// Different values for this option should not
  /// yield a proxy's cached response.
  ///
  /// Corresponds to the option being not "NoCacheKey"
  /// in strict CoAP terms
  ResponseChanges,
  /// Different values for this option
  /// should yield the cached response.
  ///
  /// Corresponds to the option being "NoCacheKey"
  /// in strict CoAP terms
  ResponseDoesNotChange,
}

impl OptNumber {
  /// Whether or not this option may be ignored by a server
  pub fn must_be_processed(&self) -> OptionMustBeProcessed {
    match self.0 & 0b1 {
      | 1 => OptionMustBeProcessed::Yes,
      | _ => OptionMustBeProcessed::No,
    }
  }

  /// Whether or not this option may be forwarded blindly by
  /// a proxy that does not support processing it
  pub fn when_unsupported_by_proxy(&self) -> WhenOptionUnsupportedByProxy {
    match (self.0 & 0b10) >> 1 {
      | 1 => WhenOptionUnsupportedByProxy::Error,
      | _ => WhenOptionUnsupportedByProxy::Forward,
    }
  }

  /// Whether or not different values for this option should
  /// yield proxies' cached response
  ///
  /// _(when the proxy does not support processing it and
  /// the option is safe to forward)_
  pub fn when_option_changes(&self) -> WhenOptionChanges {
    match (self.0 & 0b11100) >> 2 {
      | 0b111 => WhenOptionChanges::ResponseDoesNotChange,
      | _ => WhenOptionChanges::ResponseChanges,
    }
  }
}
