use tinyvec::ArrayVec;

use crate::opt::{decode_uint, encode_uint};

/// Content-Format
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFormat {
  /// `text/plain; charset=utf-8`
  Text,
  /// `application/link-format`
  LinkFormat,
  /// `application/xml`
  Xml,
  /// `application/octet-stream`
  OctetStream,
  /// `application/exi`
  Exi,
  /// `application/json`
  Json,
  /// `application/cbor`
  Cbor,
  /// Another content format
  Other(u16),
}

impl ContentFormat {
  /// Convert this content format to the CoAP byte value
  /// (a 0 to 2 byte unsigned integer)
  ///
  /// ```
  /// use sncoap_msg::ContentFormat;
  ///
  /// assert_eq!(ContentFormat::Text.bytes().as_slice(), &[]);
  /// assert_eq!(ContentFormat::Json.bytes().as_slice(), &[50]);
  /// assert_eq!(ContentFormat::Other(11542).bytes().as_slice(), &[0x2D, 0x16]);
  /// ```
  pub fn bytes(&self) -> ArrayVec<[u8; 4]> {
    encode_uint(u16::from(self).into())
  }

  /// Read a content format from its wire representation
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    match bytes.len() {
      | 0..=2 => decode_uint(bytes).map(|n| Self::from(n as u16)),
      | _ => None,
    }
  }
}

impl<'a> From<&'a ContentFormat> for u16 {
  fn from(f: &'a ContentFormat) -> Self {
    use ContentFormat::*;
    match *f {
      | Text => 0,
      | LinkFormat => 40,
      | Xml => 41,
      | OctetStream => 42,
      | Exi => 47,
      | Json => 50,
      | Cbor => 60,
      | Other(n) => n,
    }
  }
}

impl From<u16> for ContentFormat {
  fn from(n: u16) -> Self {
    use ContentFormat::*;
    match n {
      | 0 => Text,
      | 40 => LinkFormat,
      | 41 => Xml,
      | 42 => OctetStream,
      | 47 => Exi,
      | 50 => Json,
      | 60 => Cbor,
      | n => Other(n),
    }
  }
}
