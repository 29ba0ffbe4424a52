use sncoap_common::{AllocError, Buffer};
use toad_macros::rfc_7252_doc;

/// Message Code
pub mod code;

/// Message parsing errors
pub mod parse_error;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message Type
pub mod ty;

/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use ty::*;
pub use ver::*;

#[doc = rfc_7252_doc!("5.5")]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Payload<B>(pub B);

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (request, response, empty)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl TryFrom<u8> for Byte1 {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    let ver = b >> 6; // bits 0 & 1
    let ty = b >> 4 & 0b11; // bits 2 & 3
    let tkl = b & 0b1111u8; // last 4 bits

    Ok(Byte1 { ver: Version(ver),
               ty: Type::try_from(ty)?,
               tkl })
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = b.ver.0 << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl;

    ver | ty | tkl
  }
}

/// Outcome of parsing a message.
///
/// A message that could not be stored at all is never returned
/// (see [`crate::parse`]); a message whose bytes were malformed
/// is returned with `ParserError` and whatever was parsed before
/// the problem was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
  /// Well-formed (or built locally)
  #[default]
  Ok,
  /// The header or options were malformed
  ParserError(MessageParseError),
}

impl Status {
  /// Is this [`Status::Ok`]?
  pub fn is_ok(&self) -> bool {
    matches!(self, Status::Ok)
  }
}

/// # `Message` struct
/// Low-level representation of a CoAP message, generic over the
/// [`Buffer`] used to store its token, option values and payload.
///
/// Every variable-length field is an `Option`: `None` means the field is
/// absent and is left out of the serialized message entirely.
///
/// Uri-Path and Content-Format live directly on the message; every
/// other option lives in [`Options`], which is only created once
/// something needs it (see [`Message::opts_mut`]).
///
/// <details>
/// <summary><b>RFC7252 - CoAP Messaging Model</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("2.1"))]
/// </details>
/// <details>
/// <summary><b>RFC7252 - CoAP Message Binary Format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3"))]
/// </details>
///
/// ```
/// use sncoap_msg::{parse, Code, Id, Status, Type, VecMessage};
///
/// //                 ver 1, NON, tkl 1   2.05   id 1  token  Content-Format: 50  marker  payload
/// let bytes: &[u8] = &[0b_01_01_0001, 0x45, 0, 1, 0xFE, 0b1100_0001, 50, 0xFF, b'h', b'i'];
///
/// let msg = parse::<Vec<u8>>(bytes).unwrap();
///
/// let mut expected = VecMessage::new(Type::Non, Code::CONTENT, Id(1));
/// expected.token = Some(vec![0xFE]);
/// expected.content_format = Some(vec![50]);
/// expected.payload.0 = b"hi".to_vec();
///
/// assert_eq!(msg, expected);
/// assert_eq!(msg.status, Status::Ok);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message<B> {
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`Id`] for details
  pub id: Id,
  #[doc = rfc_7252_doc!("5.3.1")]
  pub token: Option<B>,
  /// Uri-Path segments joined by `/`, see [`Parts`]
  pub uri_path: Option<B>,
  /// Content-Format in its wire form, see [`ContentFormat`]
  pub content_format: Option<B>,
  /// see [`Options`]
  pub opts: Option<Options<B>>,
  /// see [`Payload`]
  pub payload: Payload<B>,
  /// see [`Status`]
  pub status: Status,
}

impl<B: Buffer> Default for Message<B> {
  fn default() -> Self {
    Self::new(Type::Con, Code::EMPTY, Id(0))
  }
}

impl<B: Buffer> Message<B> {
  /// Create a message with no token, options or payload
  pub fn new(ty: Type, code: Code, id: Id) -> Self {
    Self { ver: Version::default(),
           ty,
           code,
           id,
           token: None,
           uri_path: None,
           content_format: None,
           opts: None,
           payload: Payload(B::default()),
           status: Status::Ok }
  }

  /// Get the options record, creating an empty one if there is none yet
  pub fn opts_mut(&mut self) -> &mut Options<B> {
    self.opts.get_or_insert_with(Options::default)
  }

  /// Content-Format of the payload, if set and recognized
  pub fn format(&self) -> Option<ContentFormat> {
    self.content_format
        .as_deref()
        .and_then(ContentFormat::from_bytes)
  }

  /// Set the Content-Format of the payload
  ///
  /// ```
  /// use sncoap_msg::{Code, ContentFormat, Id, Type, VecMessage};
  ///
  /// let mut msg = VecMessage::new(Type::Con, Code::CONTENT, Id(1));
  /// msg.set_format(ContentFormat::Json).unwrap();
  /// assert_eq!(msg.content_format, Some(vec![50]));
  /// assert_eq!(msg.format(), Some(ContentFormat::Json));
  /// ```
  pub fn set_format(&mut self, format: ContentFormat) -> Result<(), AllocError> {
    self.content_format = Some(B::try_copy_from(&format.bytes())?);
    Ok(())
  }

  /// Create a new message that ACKs this one.
  ///
  /// The ACK is empty (code `0.00`), carries this message's token
  /// and uses the `id` given.
  ///
  /// ```
  /// use sncoap_msg::{Code, Id, Type, VecMessage};
  ///
  /// let mut req = VecMessage::new(Type::Con, Code::GET, Id(7));
  /// req.token = Some(vec![1, 2]);
  ///
  /// let ack = req.ack(req.id);
  /// assert_eq!(ack.ty, Type::Ack);
  /// assert_eq!(ack.code, Code::EMPTY);
  /// assert_eq!(ack.id, Id(7));
  /// assert_eq!(ack.token, Some(vec![1, 2]));
  /// ```
  pub fn ack(&self, id: Id) -> Self {
    Self { token: self.token.clone(),
           ..Self::new(Type::Ack, Code::EMPTY, id) }
  }

  /// Create a Reset message rejecting this one.
  ///
  /// Reset messages are header-only, so the token is not carried over.
  pub fn reset(&self) -> Self {
    Self::new(Type::Reset, Code::EMPTY, self.id)
  }
}
