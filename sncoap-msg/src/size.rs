use sncoap_common::Buffer;

use crate::opt::table::{self, Blockwise};
use crate::opt::{ext_size, OptNumber};
use crate::to_bytes::MessageToBytesError;
use crate::{Message, Type};

/// Size of the fixed header (byte 1, code, message id)
pub(crate) const HEADER_SIZE: usize = 4;

/// Make sure the payload can be split at `limit`
pub(crate) fn check_blockwise_limit(limit: u16) -> Result<(), MessageToBytesError> {
  if Blockwise::valid_limit(limit) {
    Ok(())
  } else {
    log::debug!("{} is not a block size", limit);
    Err(MessageToBytesError::InvalidBlockwiseLimit(limit))
  }
}

/// Make sure the header can be put on the wire
pub(crate) fn check_header<B>(msg: &Message<B>) -> Result<(), MessageToBytesError> {
  if !msg.ver.is_supported() {
    log::debug!("refusing to serialize version {}", msg.ver.0);
    return Err(MessageToBytesError::InvalidVersion(msg.ver.0));
  }

  if !msg.code.is_valid() {
    log::debug!("refusing to serialize code {}.{}", msg.code.class, msg.code.detail);
    return Err(MessageToBytesError::InvalidCode(u8::from(msg.code)));
  }

  Ok(())
}

/// Length of the token, which must be 1 to 8 bytes when present
pub(crate) fn token_len<B: Buffer>(msg: &Message<B>) -> Result<usize, MessageToBytesError> {
  match msg.token.as_deref().map(<[u8]>::len) {
    | None => Ok(0),
    | Some(len @ 1..=8) => Ok(len),
    | Some(len) => {
      log::debug!("token of {} bytes cannot be serialized", len);
      Err(MessageToBytesError::InvalidTokenLength(len))
    },
  }
}

/// Exact number of bytes `msg` occupies on the wire.
///
/// `blockwise_limit` is `0` (never split) or a block size RFC7959 allows:
/// 16, 32, 64, 128, 256, 512 or 1024.
/// When it is nonzero and the payload is longer than it,
/// only the first `blockwise_limit` payload bytes are counted and
/// any Block / Size option the message needs but does not
/// carry is counted as well.
///
/// Fails if the header cannot be serialized, the blockwise limit is not
/// a block size, or any field is outside the length range allowed for it.
///
/// ```
/// use sncoap_msg::{calculate_size, Code, Id, Type, VecMessage};
///
/// let mut msg = VecMessage::new(Type::Con, Code::GET, Id(1));
/// assert_eq!(calculate_size(&msg, 0), Ok(4));
///
/// msg.token = Some(vec![1, 2]);
/// msg.uri_path = Some(b"a/bc".to_vec());
/// msg.payload.0 = b"hello".to_vec();
///
/// //                                  header  token  a   bc  marker  payload
/// assert_eq!(calculate_size(&msg, 0), Ok(4  + 2    + 2 + 3 + 1     + 5));
/// ```
pub fn calculate_size<B: Buffer>(msg: &Message<B>,
                                 blockwise_limit: u16)
                                 -> Result<usize, MessageToBytesError> {
  check_header(msg)?;
  check_blockwise_limit(blockwise_limit)?;

  if msg.ty == Type::Reset {
    return Ok(HEADER_SIZE);
  }

  let token = token_len(msg)?;
  let bw = Blockwise::new(blockwise_limit, msg.payload.0.len());

  let mut opts = 0;
  for (known, value) in table::present(msg, bw) {
    known.check_value(&value)?;
    for part in known.parts(value.as_slice()) {
      known.check(part)?;
      opts += 1 + ext_size(part.len()) + part.len();
    }
  }

  let payload = match bw.payload(&msg.payload.0).len() {
    | 0 => 0,
    | n => 1 + n,
  };

  Ok(HEADER_SIZE + token + opts + option_jump_size(msg, bw) + payload)
}

/// Number of delta extension bytes the options of `msg` need.
///
/// Walks the options exactly the way the builder emits them;
/// every occurrence after the first of a repeatable option has a delta of 0.
pub(crate) fn option_jump_size<B: Buffer>(msg: &Message<B>, bw: Blockwise) -> usize {
  let mut prev = OptNumber(0);
  let mut size = 0;

  for (known, value) in table::present(msg, bw) {
    for _ in known.parts(value.as_slice()) {
      size += ext_size((known.number.0 - prev.0) as usize);
      prev = known.number;
    }
  }

  size
}
