use sncoap_common::{AllocError, Buffer, WriteOverflow, Writer};

use crate::logging::Summary;
use crate::opt::table::{self, Blockwise, Known, Value};
use crate::opt::{write_opt_header, OptNumber};
use crate::size::{calculate_size, token_len};
use crate::*;

/// Trait allowing fallible conversion into bytes
pub trait TryIntoBytes {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert into a collection of bytes
  ///
  /// ```
  /// use tinyvec::ArrayVec;
  /// use sncoap_msg::{ArrayVecMessage, Code, Id, TryIntoBytes, Type, VecMessage};
  ///
  /// let mut arrayvec_message = ArrayVecMessage::<64>::new(Type::Con, Code::GET, Id(1));
  /// arrayvec_message.uri_path = Some(ArrayVec::from_iter(*b"hello"));
  ///
  /// let bytes: ArrayVec<[u8; 16]> = arrayvec_message.try_into_bytes().unwrap();
  /// assert_eq!(bytes.len(), 10);
  ///
  /// // This one uses Vec
  /// let vec_message = VecMessage::new(Type::Con, Code::GET, Id(1));
  ///
  /// let bytes: Vec<u8> = vec_message.try_into_bytes().unwrap();
  /// assert_eq!(bytes, vec![0x40, 0x01, 0, 1]);
  /// ```
  fn try_into_bytes<C: Buffer>(&self) -> Result<C, Self::Error>;
}

/// Errors encounterable serializing to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// Only version 1 can be serialized
  InvalidVersion(u8),
  /// The code has a class RFC7252 does not assign, or a detail that does not fit in 5 bits
  InvalidCode(u8),
  /// A token must be 1 to 8 bytes long
  InvalidTokenLength(usize),
  /// An option (or one part of a repeatable option) had a length outside the range allowed for it
  #[allow(missing_docs)]
  InvalidOptionLength { number: OptNumber, len: usize },
  /// The blockwise limit was neither `0` nor a block size RFC7959 allows (16, 32, .., 1024)
  InvalidBlockwiseLimit(u16),
  /// Reserved capacity was not enough for size of message
  #[allow(missing_docs)]
  TooLong { capacity: usize, size: usize },
}

impl From<WriteOverflow> for MessageToBytesError {
  fn from(e: WriteOverflow) -> Self {
    Self::TooLong { capacity: e.capacity,
                    size: e.needed }
  }
}

impl From<AllocError> for MessageToBytesError {
  fn from(e: AllocError) -> Self {
    Self::TooLong { capacity: e.capacity,
                    size: e.requested }
  }
}

/// Serialize `msg` into `dst`, returning the number of bytes written.
///
/// `dst` must be at least [`calculate_size`] bytes long. The first
/// `calculate_size` bytes of `dst` are zeroed and then overwritten;
/// anything after them is left alone.
///
/// If the message cannot be serialized or `dst` is too short,
/// `dst` is not touched.
///
/// See [`calculate_size`] for the meaning of `blockwise_limit`.
///
/// ```
/// use sncoap_msg::{build, calculate_size, Code, Id, Type, VecMessage};
///
/// let mut msg = VecMessage::new(Type::Con, Code::GET, Id(0x1234));
/// msg.token = Some(vec![0xAA]);
/// msg.uri_path = Some(b"a".to_vec());
///
/// let mut buf = [0xFFu8; 16];
/// let n = build(&mut buf, &msg, 0).unwrap();
///
/// assert_eq!(n, calculate_size(&msg, 0).unwrap());
/// //                     ver 1, CON, tkl 1   GET   id          token  Uri-Path "a"
/// assert_eq!(&buf[..n], &[0b_01_00_0001,     0x01, 0x12, 0x34, 0xAA,  0b1011_0001, b'a']);
/// ```
pub fn build<B: Buffer>(dst: &mut [u8],
                        msg: &Message<B>,
                        blockwise_limit: u16)
                        -> Result<usize, MessageToBytesError> {
  let size = calculate_size(msg, blockwise_limit)?;

  if dst.len() < size {
    log::debug!("{} needs {} bytes, buffer holds {}",
                Summary(msg),
                size,
                dst.len());
    return Err(MessageToBytesError::TooLong { capacity: dst.len(),
                                              size });
  }

  let dst = &mut dst[..size];
  dst.fill(0);

  let mut w = Writer::new(dst);
  write_header(&mut w, msg)?;

  if msg.ty != Type::Reset {
    if let Some(token) = msg.token.as_deref() {
      w.write_bytes(token)?;
    }

    let bw = Blockwise::new(blockwise_limit, msg.payload.0.len());
    let mut prev = OptNumber(0);

    for (known, value) in table::present(msg, bw) {
      match value {
        | Value::Empty => write_empty_opt(&mut w, known.number, &mut prev)?,
        | value if known.separator.is_some() => {
          write_multi_opt(&mut w, known, value.as_slice(), &mut prev)?
        },
        | value => write_opt(&mut w, known.number, value.as_slice(), &mut prev)?,
      }
    }

    let payload = bw.payload(&msg.payload.0);
    if !payload.is_empty() {
      w.write_u8(0b11111111)?;
      w.write_bytes(payload)?;
    }
  }

  let written = w.position();
  debug_assert_eq!(written, size);

  log::trace!("built {} ({} bytes)", Summary(msg), written);
  Ok(written)
}

/// Serialize `msg` into a new buffer of exactly the right size
pub fn build_into<B: Buffer, C: Buffer>(msg: &Message<B>,
                                        blockwise_limit: u16)
                                        -> Result<C, MessageToBytesError> {
  let size = calculate_size(msg, blockwise_limit)?;

  let mut bytes = C::with_room_for(size)?;
  (0..size).try_for_each(|_| bytes.push_byte(0))?;

  build(&mut bytes, msg, blockwise_limit)?;
  Ok(bytes)
}

impl<B: Buffer> TryIntoBytes for Message<B> {
  type Error = MessageToBytesError;

  fn try_into_bytes<C: Buffer>(&self) -> Result<C, Self::Error> {
    build_into(self, 0)
  }
}

fn write_header<B: Buffer>(w: &mut Writer<'_>, msg: &Message<B>) -> Result<(), MessageToBytesError> {
  let tkl = match msg.ty {
    | Type::Reset => 0,
    | _ => token_len(msg)? as u8,
  };

  let byte1: u8 = Byte1 { ver: msg.ver,
                          ty: msg.ty,
                          tkl }.into();
  let id: [u8; 2] = msg.id.into();

  w.write_u8(byte1)?;
  w.write_u8(msg.code.into())?;
  w.write_bytes(&id)?;
  Ok(())
}

/// Write a single option occurrence
fn write_opt(w: &mut Writer<'_>,
             number: OptNumber,
             value: &[u8],
             prev: &mut OptNumber)
             -> Result<(), WriteOverflow> {
  write_opt_header(w, (number.0 - prev.0) as usize, value.len())?;
  w.write_bytes(value)?;
  *prev = number;
  Ok(())
}

/// Write an option that is present but has no value
fn write_empty_opt(w: &mut Writer<'_>, number: OptNumber, prev: &mut OptNumber) -> Result<(), WriteOverflow> {
  write_opt(w, number, &[], prev)
}

/// Write every part of a repeatable option as its own occurrence
fn write_multi_opt(w: &mut Writer<'_>,
                   known: &Known,
                   value: &[u8],
                   prev: &mut OptNumber)
                   -> Result<(), WriteOverflow> {
  known.parts(value)
       .try_for_each(|part| write_opt(w, known.number, part, prev))
}

#[cfg(test)]
mod tests {
  use tinyvec::ArrayVec;

  use super::*;
  use crate::{assert_eqb_iter, Observe, VecMessage};

  fn bytes(msg: &VecMessage, limit: u16) -> Vec<u8> {
    let mut buf = vec![0; calculate_size(msg, limit).unwrap()];
    let n = build(&mut buf, msg, limit).unwrap();
    assert_eq!(n, buf.len());
    buf
  }

  #[test]
  fn msg() {
    let (msg, expected) = crate::test_msg();
    let actual: Vec<u8> = msg.try_into_bytes().unwrap();
    assert_eqb_iter!(actual, expected);
  }

  #[test]
  fn header() {
    let msg = VecMessage::new(Type::Ack, Code::CONTENT, Id(12));
    assert_eqb_iter!(bytes(&msg, 0), [0b_01_10_0000u8, 0b010_00101, 0, 12]);
  }

  #[test]
  fn reset_writes_header_only() {
    let mut msg = VecMessage::new(Type::Reset, Code::EMPTY, Id(1));
    msg.token = Some(vec![1, 2, 3]);
    msg.uri_path = Some(b"a/b".to_vec());
    msg.payload.0 = b"nope".to_vec();

    let mut buf = [0xAAu8; 8];
    assert_eq!(build(&mut buf, &msg, 0), Ok(4));
    assert_eqb_iter!(buf, [0b_01_11_0000u8, 0, 0, 1, 0xAA, 0xAA, 0xAA, 0xAA]);
  }

  #[test]
  fn buffer_too_small_is_untouched() {
    let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    msg.payload.0 = vec![1; 10];

    let mut buf = [0xAAu8; 8];
    assert_eq!(build(&mut buf, &msg, 0),
               Err(MessageToBytesError::TooLong { capacity: 8,
                                                  size: 15 }));
    assert_eq!(buf, [0xAA; 8]);
  }

  #[test]
  fn invalid_message_is_untouched() {
    let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    msg.opts_mut().uri_host = Some(vec![]);

    let mut buf = [0xAAu8; 8];
    assert_eq!(build(&mut buf, &msg, 0),
               Err(MessageToBytesError::InvalidOptionLength { number: OptNumber(3),
                                                              len: 0 }));
    assert_eq!(buf, [0xAA; 8]);
  }

  #[test]
  fn zeroes_only_what_it_writes() {
    let msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    let mut buf = [0xAAu8; 6];
    assert_eq!(build(&mut buf, &msg, 0), Ok(4));
    assert_eq!(&buf[4..], &[0xAA, 0xAA]);
  }

  #[test]
  fn options_ascend() {
    let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    msg.uri_path = Some(b"a".to_vec());
    msg.content_format = Some(vec![]);
    let opts = msg.opts_mut();
    opts.size1 = Some(vec![4]);
    opts.uri_host = Some(b"h".to_vec());
    opts.observe = Some(Observe::Requested);

    let expected: Vec<u8> = vec![0b_01_00_0000, 1, 0, 1,
                                 // Uri-Host: delta 3, "h"
                                 0b0011_0001, b'h',
                                 // Observe: delta 3, empty
                                 0b0011_0000,
                                 // Uri-Path: delta 5, "a"
                                 0b0101_0001, b'a',
                                 // Content-Format: delta 1, empty
                                 0b0001_0000,
                                 // Size1: delta 48, 1 byte
                                 0b1101_0001, 48 - 13, 4];

    assert_eqb_iter!(bytes(&msg, 0), expected);
  }

  #[test]
  fn repeatable_options_share_a_number() {
    let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    msg.uri_path = Some(b"/a/bc/".to_vec());
    msg.opts_mut().uri_query = Some(b"x=1&y".to_vec());

    let expected: Vec<u8> = vec![0b_01_00_0000, 1, 0, 1,
                                 0b1011_0001, b'a',
                                 0b0000_0010, b'b', b'c',
                                 0b0100_0011, b'x', b'=', b'1',
                                 0b0000_0001, b'y'];

    assert_eqb_iter!(bytes(&msg, 0), expected);
  }

  #[test]
  fn long_option_value() {
    let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
    msg.opts_mut().proxy_uri = Some(vec![b'p'; 300]);

    let actual = bytes(&msg, 0);
    assert_eqb_iter!(actual[4..8], [0b1101_1110u8, 35 - 13, 0, 31]);
    assert_eq!(actual.len(), 8 + 300);
  }

  #[test]
  fn no_payload_marker() {
    let msg = VecMessage::new(Type::Con, Code::CONTENT, Id(0));
    assert_ne!(bytes(&msg, 0).last(), Some(&0b11111111));
  }

  #[test]
  fn blockwise_request_uses_block1_and_size1() {
    let mut msg = VecMessage::new(Type::Con, Code::PUT, Id(1));
    msg.payload.0 = (0..40).collect();

    let actual = bytes(&msg, 16);
    let expected: Vec<u8> = [vec![0b_01_00_0000, 3, 0, 1,
                                  // Block1 (27): num 0, more, szx 0
                                  0b1101_0001, 27 - 13, 0b1000,
                                  // Size1 (60): 40
                                  0b1101_0001, 60 - 27 - 13, 40,
                                  0xFF],
                             (0..16).collect()].concat();

    assert_eqb_iter!(actual, expected);
  }

  #[test]
  fn blockwise_response_uses_block2_and_size2() {
    let mut msg = VecMessage::new(Type::Ack, Code::CONTENT, Id(1));
    msg.payload.0 = vec![9; 40];

    let actual = bytes(&msg, 32);
    let expected: Vec<u8> = [vec![0b_01_10_0000, 0x45, 0, 1,
                                  // Block2 (23): num 0, more, szx 1
                                  0b1101_0001, 23 - 13, 0b1001,
                                  // Size2 (28): 40
                                  0b0101_0001, 40,
                                  0xFF],
                             vec![9; 32]].concat();

    assert_eqb_iter!(actual, expected);
  }

  #[test]
  fn explicit_block_options_are_not_overridden() {
    let mut msg = VecMessage::new(Type::Ack, Code::CONTENT, Id(1));
    msg.payload.0 = vec![9; 40];
    msg.opts_mut().block2 = Some(vec![0b0001_1001]);

    let actual = bytes(&msg, 32);
    assert_eqb_iter!(actual[4..7], [0b1101_0001u8, 23 - 13, 0b0001_1001]);
  }

  #[test]
  fn arrayvec_output() {
    let msg = VecMessage::new(Type::Con, Code::GET, Id(1));

    let ok: ArrayVec<[u8; 4]> = msg.try_into_bytes().unwrap();
    assert_eq!(ok.as_slice(), &[0x40, 0x01, 0, 1]);

    assert_eq!(msg.try_into_bytes::<ArrayVec<[u8; 3]>>(),
               Err(MessageToBytesError::TooLong { capacity: 3,
                                                  size: 4 }));
  }
}
