use toad_cursor::Cursor;

use super::MessageParseError;

/// # Message ID
///
/// 16-bit unsigned integer in network byte order.  Used to
/// detect message duplication and to match messages of type
/// Acknowledgement/Reset to messages of type Confirmable/Non-
/// confirmable.
///
/// Ids are never generated here; they are assigned by whoever
/// owns the transport.
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, Hash, PartialEq, PartialOrd, Debug, Eq, Ord, Default)]
pub struct Id(pub u16);

impl Id {
  /// Create an Id from a big-endian 2-byte unsigned int
  pub fn from_be_bytes(bs: [u8; 2]) -> Self {
    Self(u16::from_be_bytes(bs))
  }

  pub(crate) fn consume<A: AsRef<[u8]>>(bytes: &mut Cursor<A>) -> Result<Self, MessageParseError> {
    match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(Id::from_be_bytes([a, b])),
      | _ => Err(MessageParseError::eof()),
    }
  }
}

impl From<Id> for [u8; 2] {
  fn from(id: Id) -> [u8; 2] {
    id.0.to_be_bytes()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_id() {
    let mut id_bytes = Cursor::new(34u16.to_be_bytes());
    assert_eq!(Id::consume(&mut id_bytes), Ok(Id(34)));
    assert_eq!(Id::consume(&mut id_bytes), Err(MessageParseError::eof()));
  }

  #[test]
  fn id_bytes() {
    let bytes: [u8; 2] = Id(0x1234).into();
    assert_eq!(bytes, [0x12, 0x34]);
  }
}
