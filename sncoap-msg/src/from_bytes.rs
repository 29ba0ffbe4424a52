use sncoap_common::{AllocError, Buffer};
use toad_cursor::Cursor;

use crate::logging::Summary;
use crate::opt::table::{self, Field};
use crate::opt::{parse_opt_len_or_delta, OptionMustBeProcessed};
use crate::*;

/// Trait for converting a sequence of bytes into some data structure
pub trait TryFromBytes<A: AsRef<[u8]>>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert from some sequence of bytes `T`
  /// into `Self`
  fn try_from_bytes(bytes: A) -> Result<Self, Self::Error>;
}

/// Why a message could not be parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageFromBytesError {
  /// A field did not fit in the chosen [`Buffer`]
  Alloc(AllocError),
  /// The bytes were not a well-formed message
  Malformed(MessageParseError),
}

impl From<AllocError> for MessageFromBytesError {
  fn from(e: AllocError) -> Self {
    Self::Alloc(e)
  }
}

impl From<MessageParseError> for MessageFromBytesError {
  fn from(e: MessageParseError) -> Self {
    Self::Malformed(e)
  }
}

impl From<OptParseError> for MessageFromBytesError {
  fn from(e: OptParseError) -> Self {
    Self::Malformed(e.into())
  }
}

/// Parse a message.
///
/// There are two ways this can go wrong, and they are reported differently:
/// - `Err` means some field was too big for `B`; nothing is returned
/// - `Ok` with [`Status::ParserError`] means the bytes were malformed; the
///   message holds everything that was parsed before the problem was found
///
/// ```
/// use sncoap_msg::{parse, MessageParseError, Status, Type};
/// use tinyvec::ArrayVec;
///
/// //                  ver 1, ACK   2.05  id 5  Uri-Path "hi"
/// let bytes: &[u8] = &[0b_01_10_0000, 0x45, 0, 5, 0b1011_0010, b'h', b'i'];
///
/// let msg = parse::<Vec<u8>>(bytes).unwrap();
/// assert_eq!(msg.status, Status::Ok);
/// assert_eq!(msg.ty, Type::Ack);
/// assert_eq!(msg.uri_path, Some(b"hi".to_vec()));
///
/// // too big for the storage
/// assert!(parse::<ArrayVec<[u8; 1]>>(bytes).is_err());
///
/// // truncated
/// let msg = parse::<Vec<u8>>(&bytes[..5]).unwrap();
/// assert_eq!(msg.status,
///            Status::ParserError(MessageParseError::OptParseError(
///              sncoap_msg::OptParseError::UnexpectedEndOfStream)));
/// ```
pub fn parse<B: Buffer>(bytes: &[u8]) -> Result<Message<B>, AllocError> {
  let mut msg = Message::<B>::default();

  match parse_into(&mut msg, bytes) {
    | Ok(()) => {
      log::trace!("parsed {}", Summary(&msg));
      Ok(msg)
    },
    | Err(MessageFromBytesError::Malformed(e)) => {
      log::debug!("malformed message ({} bytes): {:?}", bytes.len(), e);
      msg.status = Status::ParserError(e);
      Ok(msg)
    },
    | Err(MessageFromBytesError::Alloc(e)) => {
      log::debug!("could not store parsed message: {:?}", e);
      Err(e)
    },
  }
}

impl<A: AsRef<[u8]>, B: Buffer> TryFromBytes<A> for Message<B> {
  type Error = MessageFromBytesError;

  fn try_from_bytes(bytes: A) -> Result<Self, Self::Error> {
    let msg = parse(bytes.as_ref())?;
    match msg.status {
      | Status::Ok => Ok(msg),
      | Status::ParserError(e) => Err(e.into()),
    }
  }
}

fn parse_into<B: Buffer>(msg: &mut Message<B>, input: &[u8]) -> Result<(), MessageFromBytesError> {
  let bytes = &mut Cursor::new(input);

  let Byte1 { tkl, ty, ver } = bytes.next()
                                    .ok_or_else(MessageParseError::eof)?
                                    .try_into()?;
  msg.ver = ver;
  msg.ty = ty;

  if !ver.is_supported() {
    return Err(MessageParseError::InvalidVersion(ver.0).into());
  }

  if tkl > 8 {
    return Err(MessageParseError::InvalidTokenLength(tkl).into());
  }

  let code = bytes.next().ok_or_else(MessageParseError::eof)?;
  msg.code = Code::from(code);
  if !msg.code.is_valid() {
    return Err(MessageParseError::InvalidCode(code).into());
  }

  msg.id = Id::consume(bytes)?;

  if tkl > 0 {
    let token = bytes.take_exact(tkl as usize)
                     .ok_or_else(MessageParseError::eof)?;
    msg.token = Some(B::try_copy_from(token)?);
  }

  let mut number = 0u32;
  loop {
    let head = match bytes.next() {
      | None => return Ok(()),
      | Some(0b11111111) => break,
      | Some(b) => b,
    };

    let delta = parse_opt_len_or_delta(head >> 4,
                                       bytes,
                                       OptParseError::OptionDeltaReservedValue(head >> 4))?;
    let len = parse_opt_len_or_delta(head & 0b1111,
                                     bytes,
                                     OptParseError::ValueLengthReservedValue(head & 0b1111))?;

    number = number.saturating_add(delta);
    let value = bytes.take_exact(len as usize)
                     .ok_or_else(OptParseError::eof)?;

    store_opt(msg, OptNumber(number), value)?;
  }

  let payload = &input[bytes.position()..];
  if payload.is_empty() {
    return Err(MessageParseError::PayloadMarkerWithoutPayload.into());
  }

  msg.payload = Payload(B::try_copy_from(payload)?);
  Ok(())
}

fn store_opt<B: Buffer>(msg: &mut Message<B>,
                        number: OptNumber,
                        value: &[u8])
                        -> Result<(), MessageFromBytesError> {
  let known = match table::lookup(number) {
    | Some(known) => known,
    | None => match number.must_be_processed() {
      | OptionMustBeProcessed::Yes => {
        return Err(OptParseError::UnrecognizedCritical(number).into())
      },
      | OptionMustBeProcessed::No => {
        log::debug!("ignoring unrecognized elective option {}", number.0);
        return Ok(());
      },
    },
  };

  if !known.fits(value.len()) {
    return Err(OptParseError::InvalidLength { number,
                                              len: value.len() }.into());
  }

  if known.field == Field::Observe {
    let opts = msg.opts_mut();
    if opts.observe.is_some() {
      return Err(OptParseError::Repeated(number).into());
    }

    opts.observe = Some(match value {
                          | [] => Observe::Requested,
                          | value => Observe::Value(B::try_copy_from(value)?),
                        });
    return Ok(());
  }

  let slot = match table::slot(known.field, msg) {
    | Some(slot) => slot,
    | None => return Ok(()),
  };

  match (slot.take(), known.separator) {
    | (None, _) => *slot = Some(B::try_copy_from(value)?),
    | (Some(mut joined), Some(sep)) => {
      joined.push_byte(sep)?;
      joined.append_bytes(value)?;
      *slot = Some(joined);
    },
    | (Some(first), None) => {
      *slot = Some(first);
      return Err(OptParseError::Repeated(number).into());
    },
  }

  Ok(())
}
