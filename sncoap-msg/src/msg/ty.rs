use super::MessageParseError;

/// Indicates if this message is of
/// type Confirmable (0), Non-confirmable (1), Acknowledgement (2), or Reset (3).
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Type {
  /// A message that requires an acknowledgement.
  ///
  /// When no packets are lost, each Confirmable message elicits
  /// exactly one return message of type Acknowledgement or type Reset.
  Con,
  /// A message that does not require an acknowledgement,
  /// e.g. repeated readings from a sensor.
  Non,
  /// Acknowledges that a specific Confirmable message arrived.
  ///
  /// May carry a piggybacked response.
  Ack,
  /// A specific message was received, but some context is missing
  /// to properly process it.
  ///
  /// Reset messages are always empty: a header and nothing else.
  Reset,
}

impl TryFrom<u8> for Type {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    match b {
      | 0 => Ok(Type::Con),
      | 1 => Ok(Type::Non),
      | 2 => Ok(Type::Ack),
      | 3 => Ok(Type::Reset),
      | _ => Err(MessageParseError::InvalidType(b)),
    }
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    use Type::*;
    match t {
      | Con => 0,
      | Non => 1,
      | Ack => 2,
      | Reset => 3,
    }
  }
}
