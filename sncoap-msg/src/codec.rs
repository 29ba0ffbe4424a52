use core::fmt;
use core::marker::PhantomData;

use sncoap_common::{AllocError, Buffer};

use crate::config::Config;
use crate::response::{build_response, ResponseError};
use crate::to_bytes::{build, build_into, MessageToBytesError};
use crate::{calculate_size, parse, Code, Message};

/// A [`Config`] together with the storage strategy messages use.
///
/// Every operation is also available as a free function taking
/// the blockwise limit explicitly; a `Codec` just remembers it.
///
/// ```
/// use sncoap_msg::config::Config;
/// use sncoap_msg::{Code, Codec, Id, Type};
///
/// let codec = Codec::<Vec<u8>>::new(Config::blockwise(16).unwrap());
///
/// let mut req = codec.message(Type::Con, Code::PUT, Id(1));
/// req.payload.0 = vec![0; 64];
///
/// let mut buf = vec![0; codec.calculate_size(&req).unwrap()];
/// let n = codec.build(&mut buf, &req).unwrap();
///
/// let sent = codec.parse(&buf[..n]).unwrap();
/// assert_eq!(sent.payload.0.len(), 16);
/// assert_eq!(sent.opts.unwrap().size1_bytes(), Some(64));
/// ```
pub struct Codec<B> {
  config: Config,
  _storage: PhantomData<fn() -> B>,
}

impl<B> Clone for Codec<B> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<B> Copy for Codec<B> {}

impl<B> fmt::Debug for Codec<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Codec")
     .field("config", &self.config)
     .finish()
  }
}

impl<B> Default for Codec<B> {
  fn default() -> Self {
    Self::new(Config::default())
  }
}

impl<B> Codec<B> {
  /// Create a codec
  pub const fn new(config: Config) -> Self {
    Self { config,
           _storage: PhantomData }
  }

  /// The config this codec was created with
  pub fn config(&self) -> Config {
    self.config
  }
}

impl<B: Buffer> Codec<B> {
  /// Create an empty message using this codec's storage
  pub fn message(&self, ty: crate::Type, code: Code, id: crate::Id) -> Message<B> {
    Message::new(ty, code, id)
  }

  /// See [`calculate_size`]
  pub fn calculate_size(&self, msg: &Message<B>) -> Result<usize, MessageToBytesError> {
    calculate_size(msg, self.config.blockwise_payload_size)
  }

  /// See [`build`]
  pub fn build(&self, dst: &mut [u8], msg: &Message<B>) -> Result<usize, MessageToBytesError> {
    build(dst, msg, self.config.blockwise_payload_size)
  }

  /// Serialize into a new buffer of exactly the right size, see [`build`]
  pub fn try_into_bytes<C: Buffer>(&self, msg: &Message<B>) -> Result<C, MessageToBytesError> {
    build_into(msg, self.config.blockwise_payload_size)
  }

  /// See [`parse`]
  pub fn parse(&self, bytes: &[u8]) -> Result<Message<B>, AllocError> {
    parse(bytes)
  }

  /// See [`build_response`]
  pub fn build_response(&self, req: &Message<B>, code: Code) -> Result<Message<B>, ResponseError> {
    build_response(req, code)
  }
}
