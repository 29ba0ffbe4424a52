use sncoap_common::{AllocError, Buffer};

use super::{decode_uint, encode_uint, Action, Block};

/// Value of the Observe option
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Observe<B> {
  /// The option is present with an empty value
  /// (how RFC7641 encodes `0`, "register")
  Requested,
  /// The option is present with this value (1 to 3 bytes)
  Value(B),
}

/// Options carried by a message other than Uri-Path and Content-Format,
/// which live directly on [`crate::Message`].
///
/// Every field is independently optional; `None` means the option
/// is left out of the message.
///
/// Repeatable options (`etag`, `location_path`, `uri_query`, `accept`, `location_query`)
/// hold every occurrence in one buffer, see [`super::Parts`].
///
/// `etag` and `accept` are opaque bytes but are split on `&` like every
/// other non-path repeatable option: a `0x26` byte anywhere in them starts
/// a new occurrence, and a single leading or trailing one is dropped.
/// `accept = Some(vec![38])` goes out as an empty Accept.
///
/// Unsigned integer options are kept in their wire form;
/// the typed getters and setters convert.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Options<B> {
  /// Uri-Host, 1 to 255 bytes
  pub uri_host: Option<B>,
  /// ETag, 1 to 8 bytes per occurrence, joined by `&` (so an ETag must not contain `0x26`)
  pub etag: Option<B>,
  /// Observe
  pub observe: Option<Observe<B>>,
  /// Uri-Port, 0 to 2 bytes
  pub uri_port: Option<B>,
  /// Location-Path, 0 to 255 bytes per segment, joined by `/`
  pub location_path: Option<B>,
  /// Max-Age, 0 to 4 bytes
  pub max_age: Option<B>,
  /// Uri-Query, 1 to 255 bytes per parameter, joined by `&`
  pub uri_query: Option<B>,
  /// Accept, 0 to 2 bytes per occurrence, joined by `&` (so a format must not contain `0x26`)
  pub accept: Option<B>,
  /// Location-Query, 0 to 255 bytes per parameter, joined by `&`
  pub location_query: Option<B>,
  /// Block2, 1 to 3 bytes
  pub block2: Option<B>,
  /// Block1, 1 to 3 bytes
  pub block1: Option<B>,
  /// Size2, 0 to 4 bytes
  pub size2: Option<B>,
  /// Proxy-Uri, 1 to 1034 bytes
  pub proxy_uri: Option<B>,
  /// Size1, 0 to 4 bytes
  pub size1: Option<B>,
}

fn uint<B: Buffer>(field: &Option<B>) -> Option<u32> {
  field.as_deref().and_then(decode_uint)
}

fn set_uint<B: Buffer>(field: &mut Option<B>, n: u32) -> Result<(), AllocError> {
  *field = Some(B::try_copy_from(&encode_uint(n))?);
  Ok(())
}

fn set_block<B: Buffer>(field: &mut Option<B>, block: Block) -> Result<(), AllocError> {
  let bytes = block.to_bytes().ok_or(AllocError { requested: 4,
                                                  capacity: 3 })?;
  *field = Some(B::try_copy_from(&bytes)?);
  Ok(())
}

impl<B: Buffer> Options<B> {
  /// Uri-Port as a number
  ///
  /// ```
  /// use sncoap_msg::Options;
  ///
  /// let mut opts = Options::<Vec<u8>>::default();
  /// opts.set_uri_port(5683).unwrap();
  /// assert_eq!(opts.uri_port.as_deref(), Some([0x16, 0x33].as_ref()));
  /// assert_eq!(opts.port(), Some(5683));
  /// ```
  pub fn port(&self) -> Option<u16> {
    uint(&self.uri_port).and_then(|n| u16::try_from(n).ok())
  }

  /// Set Uri-Port
  pub fn set_uri_port(&mut self, port: u16) -> Result<(), AllocError> {
    set_uint(&mut self.uri_port, port.into())
  }

  /// Max-Age in seconds
  pub fn max_age_secs(&self) -> Option<u32> {
    uint(&self.max_age)
  }

  /// Set Max-Age in seconds
  pub fn set_max_age(&mut self, secs: u32) -> Result<(), AllocError> {
    set_uint(&mut self.max_age, secs)
  }

  /// Size1 (request payload size) in bytes
  pub fn size1_bytes(&self) -> Option<u32> {
    uint(&self.size1)
  }

  /// Set Size1
  pub fn set_size1(&mut self, size: u32) -> Result<(), AllocError> {
    set_uint(&mut self.size1, size)
  }

  /// Size2 (response payload size) in bytes
  pub fn size2_bytes(&self) -> Option<u32> {
    uint(&self.size2)
  }

  /// Set Size2
  pub fn set_size2(&mut self, size: u32) -> Result<(), AllocError> {
    set_uint(&mut self.size2, size)
  }

  /// Block1 as a [`Block`]
  ///
  /// ```
  /// use sncoap_msg::{Block, Options};
  ///
  /// let mut opts = Options::<Vec<u8>>::default();
  /// opts.set_block1(Block::new(256, 3, true)).unwrap();
  /// assert_eq!(opts.block1_value().map(|b| (b.num(), b.more(), b.size())),
  ///            Some((3, true, 256)));
  /// ```
  pub fn block1_value(&self) -> Option<Block> {
    self.block1.as_deref().and_then(Block::from_bytes)
  }

  /// Set Block1
  pub fn set_block1(&mut self, block: Block) -> Result<(), AllocError> {
    set_block(&mut self.block1, block)
  }

  /// Block2 as a [`Block`]
  pub fn block2_value(&self) -> Option<Block> {
    self.block2.as_deref().and_then(Block::from_bytes)
  }

  /// Set Block2
  pub fn set_block2(&mut self, block: Block) -> Result<(), AllocError> {
    set_block(&mut self.block2, block)
  }

  /// Interpret Observe as a registration request
  ///
  /// ```
  /// use sncoap_msg::{Action, Observe, Options};
  ///
  /// let mut opts = Options::<Vec<u8>>::default();
  /// opts.set_observe(Action::Register).unwrap();
  /// assert_eq!(opts.observe, Some(Observe::Requested));
  /// assert_eq!(opts.observe_action(), Some(Action::Register));
  ///
  /// opts.set_observe(Action::Deregister).unwrap();
  /// assert_eq!(opts.observe, Some(Observe::Value(vec![1])));
  /// ```
  pub fn observe_action(&self) -> Option<Action> {
    match self.observe {
      | Some(Observe::Requested) => Some(Action::Register),
      | Some(Observe::Value(ref b)) => decode_uint(b).and_then(Action::from_value),
      | None => None,
    }
  }

  /// Set Observe to register or deregister
  pub fn set_observe(&mut self, action: Action) -> Result<(), AllocError> {
    self.observe = match action {
      | Action::Register => Some(Observe::Requested),
      | Action::Deregister => Some(Observe::Value(B::try_copy_from(&[u8::from(action)])?)),
    };
    Ok(())
  }
}
