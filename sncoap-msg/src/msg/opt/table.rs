//! The set of options this crate understands, in the order they go on the wire.
//!
//! Size calculation, the option jump count and serialization all walk
//! [`TABLE`] front to back, so they can never disagree about which options
//! a message carries or in what order.

use sncoap_common::Buffer;
use tinyvec::ArrayVec;

use super::known::{no_repeat, repeat};
use super::{encode_uint, Block, Observe, OptNumber, Parts};
use crate::to_bytes::MessageToBytesError;
use crate::Message;

/// Which field of a message an entry reads from / writes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
  UriHost,
  ETag,
  Observe,
  UriPort,
  LocationPath,
  UriPath,
  ContentFormat,
  MaxAge,
  UriQuery,
  Accept,
  LocationQuery,
  Block2,
  Block1,
  Size2,
  ProxyUri,
  Size1,
}

/// A known option
#[derive(Clone, Copy, Debug)]
pub(crate) struct Known {
  pub(crate) number: OptNumber,
  pub(crate) field: Field,
  /// Separator joining occurrences, if repeatable
  pub(crate) separator: Option<u8>,
  /// Shortest legal occurrence
  pub(crate) min: usize,
  /// Longest legal occurrence
  pub(crate) max: usize,
}

const fn known(number: OptNumber,
               field: Field,
               separator: Option<u8>,
               min: usize,
               max: usize)
               -> Known {
  Known { number,
          field,
          separator,
          min,
          max }
}

const PATH: Option<u8> = Some(repeat::PATH_SEPARATOR);
const QUERY: Option<u8> = Some(repeat::QUERY_SEPARATOR);

const KNOWN: [Known; 16] =
  [known(no_repeat::HOST, Field::UriHost, None, 1, 255),
   known(repeat::ETAG, Field::ETag, QUERY, 1, 8),
   known(no_repeat::OBSERVE, Field::Observe, None, 0, 3),
   known(no_repeat::PORT, Field::UriPort, None, 0, 2),
   known(repeat::LOCATION_PATH, Field::LocationPath, PATH, 0, 255),
   known(repeat::PATH, Field::UriPath, PATH, 0, 255),
   known(no_repeat::CONTENT_FORMAT, Field::ContentFormat, None, 0, 2),
   known(no_repeat::MAX_AGE, Field::MaxAge, None, 0, 4),
   known(repeat::QUERY, Field::UriQuery, QUERY, 1, 255),
   known(repeat::ACCEPT, Field::Accept, QUERY, 0, 2),
   known(repeat::LOCATION_QUERY, Field::LocationQuery, QUERY, 0, 255),
   known(no_repeat::BLOCK2, Field::Block2, None, 1, 3),
   known(no_repeat::BLOCK1, Field::Block1, None, 1, 3),
   known(no_repeat::SIZE2, Field::Size2, None, 0, 4),
   known(no_repeat::PROXY_URI, Field::ProxyUri, None, 1, 1034),
   known(no_repeat::SIZE1, Field::Size1, None, 0, 4)];

const fn strictly_ascending(table: &[Known]) -> bool {
  let mut ix = 1;
  while ix < table.len() {
    if table[ix - 1].number.0 >= table[ix].number.0 {
      return false;
    }
    ix += 1;
  }
  true
}

const _: () = assert!(strictly_ascending(&KNOWN), "option table must be sorted");

pub(crate) static TABLE: [Known; 16] = KNOWN;

/// Find the table entry for an option number
pub(crate) fn lookup(number: OptNumber) -> Option<&'static Known> {
  TABLE.binary_search_by_key(&number, |k| k.number)
       .ok()
       .map(|ix| &TABLE[ix])
}

/// Blockwise transfer parameters for one serialization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Blockwise {
  pub(crate) limit: u16,
  pub(crate) payload_len: usize,
}

impl Blockwise {
  pub(crate) fn new(limit: u16, payload_len: usize) -> Self {
    Self { limit, payload_len }
  }

  /// `0` (never split) or a block size RFC7959 can express: a power of two in `16..=1024`.
  ///
  /// Any other limit would send a chunk whose length disagrees
  /// with the size the Block option announces.
  pub(crate) const fn valid_limit(limit: u16) -> bool {
    limit == 0 || (limit.is_power_of_two() && limit >= 16 && limit <= 1024)
  }

  /// Does the payload need to be split into blocks?
  pub(crate) fn needed(&self) -> bool {
    self.limit > 0 && self.payload_len > self.limit as usize
  }

  /// Block option describing the first block of the payload
  fn first_block(&self) -> ArrayVec<[u8; 4]> {
    // block 0 with the "more" flag set is never 0, so always 1 byte
    encode_uint(Block::new(self.limit, 0, true).into())
  }

  /// Size option announcing the full payload length
  fn total_size(&self) -> ArrayVec<[u8; 4]> {
    encode_uint(u32::try_from(self.payload_len).unwrap_or(u32::MAX))
  }

  /// The part of the payload that goes into this message
  pub(crate) fn payload<'a>(&self, payload: &'a [u8]) -> &'a [u8] {
    if self.needed() {
      &payload[..self.limit as usize]
    } else {
      payload
    }
  }
}

/// An option value about to be serialized
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Value<'a> {
  /// Stored on the message
  Borrowed(&'a [u8]),
  /// Synthesized for a blockwise transfer
  Synthesized(ArrayVec<[u8; 4]>),
  /// Present without a value (Observe registration)
  Empty,
}

impl<'a> Value<'a> {
  pub(crate) fn as_slice(&self) -> &[u8] {
    match self {
      | Value::Borrowed(b) => b,
      | Value::Synthesized(b) => b.as_slice(),
      | Value::Empty => &[],
    }
  }
}

impl Known {
  /// Get this option's value from a message, if present
  pub(crate) fn value<'a, B: Buffer>(&self, msg: &'a Message<B>, bw: Blockwise) -> Option<Value<'a>> {
    let opts = msg.opts.as_ref();
    let stored = |f: fn(&'a super::Options<B>) -> &'a Option<B>| {
      opts.and_then(|o| f(o).as_deref()).map(Value::Borrowed)
    };

    let request = msg.code.is_request_side();
    let synthesize = |matches_side: bool, v: fn(&Blockwise) -> ArrayVec<[u8; 4]>| {
      (bw.needed() && matches_side).then(|| Value::Synthesized(v(&bw)))
    };

    match self.field {
      | Field::UriHost => stored(|o| &o.uri_host),
      | Field::ETag => stored(|o| &o.etag),
      | Field::Observe => match opts.and_then(|o| o.observe.as_ref()) {
        | Some(Observe::Requested) => Some(Value::Empty),
        | Some(Observe::Value(b)) => Some(Value::Borrowed(&b[..])),
        | None => None,
      },
      | Field::UriPort => stored(|o| &o.uri_port),
      | Field::LocationPath => stored(|o| &o.location_path),
      | Field::UriPath => msg.uri_path.as_deref().map(Value::Borrowed),
      | Field::ContentFormat => msg.content_format.as_deref().map(Value::Borrowed),
      | Field::MaxAge => stored(|o| &o.max_age),
      | Field::UriQuery => stored(|o| &o.uri_query),
      | Field::Accept => stored(|o| &o.accept),
      | Field::LocationQuery => stored(|o| &o.location_query),
      | Field::Block2 => stored(|o| &o.block2).or_else(|| synthesize(!request, Blockwise::first_block)),
      | Field::Block1 => stored(|o| &o.block1).or_else(|| synthesize(request, Blockwise::first_block)),
      | Field::Size2 => stored(|o| &o.size2).or_else(|| synthesize(!request, Blockwise::total_size)),
      | Field::ProxyUri => stored(|o| &o.proxy_uri),
      | Field::Size1 => stored(|o| &o.size1).or_else(|| synthesize(request, Blockwise::total_size)),
    }
  }

  /// Split a value into its wire-level occurrences
  pub(crate) fn parts<'a>(&self, value: &'a [u8]) -> Parts<'a> {
    match self.separator {
      | Some(sep) => Parts::split(value, sep),
      | None => Parts::whole(value),
    }
  }

  /// Is `len` a legal length for a single occurrence?
  pub(crate) fn fits(&self, len: usize) -> bool {
    (self.min..=self.max).contains(&len)
  }

  /// A zero-length Observe is how registration ([`Observe::Requested`]) goes
  /// on the wire, so a stored [`Observe::Value`] must not be empty.
  pub(crate) fn check_value(&self, value: &Value<'_>) -> Result<(), MessageToBytesError> {
    match (self.field, value) {
      | (Field::Observe, Value::Borrowed(b)) if b.is_empty() => {
        log::debug!("empty observe value would be read back as a registration");
        Err(MessageToBytesError::InvalidOptionLength { number: self.number,
                                                        len: 0 })
      },
      | _ => Ok(()),
    }
  }

  /// Check that a single occurrence has a legal length
  pub(crate) fn check(&self, part: &[u8]) -> Result<(), MessageToBytesError> {
    if self.fits(part.len()) {
      Ok(())
    } else {
      log::debug!("option {} has illegal length {} (allowed {}..={})",
                  self.number.0,
                  part.len(),
                  self.min,
                  self.max);
      Err(MessageToBytesError::InvalidOptionLength { number: self.number,
                                                      len: part.len() })
    }
  }
}

/// Every option in `msg` that will be serialized, in ascending order
pub(crate) fn present<'a, B: Buffer>(msg: &'a Message<B>,
                                     bw: Blockwise)
                                     -> impl Iterator<Item = (&'static Known, Value<'a>)> + 'a {
  TABLE.iter().filter_map(move |k| k.value(msg, bw).map(|v| (k, v)))
}

/// Where a parsed option's value is stored.
///
/// `None` for Observe, which is not a plain buffer.
pub(crate) fn slot<B: Buffer>(field: Field, msg: &mut Message<B>) -> Option<&mut Option<B>> {
  let slot = match field {
    | Field::UriPath => &mut msg.uri_path,
    | Field::ContentFormat => &mut msg.content_format,
    | Field::Observe => return None,
    | Field::UriHost => &mut msg.opts_mut().uri_host,
    | Field::ETag => &mut msg.opts_mut().etag,
    | Field::UriPort => &mut msg.opts_mut().uri_port,
    | Field::LocationPath => &mut msg.opts_mut().location_path,
    | Field::MaxAge => &mut msg.opts_mut().max_age,
    | Field::UriQuery => &mut msg.opts_mut().uri_query,
    | Field::Accept => &mut msg.opts_mut().accept,
    | Field::LocationQuery => &mut msg.opts_mut().location_query,
    | Field::Block2 => &mut msg.opts_mut().block2,
    | Field::Block1 => &mut msg.opts_mut().block1,
    | Field::Size2 => &mut msg.opts_mut().size2,
    | Field::ProxyUri => &mut msg.opts_mut().proxy_uri,
    | Field::Size1 => &mut msg.opts_mut().size1,
  };
  Some(slot)
}
