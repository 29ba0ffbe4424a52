/// What a client asks of a server by putting Observe (RFC7641)
/// in a GET request.
///
/// `Register` is the value `0`, which goes on the wire as a zero-length
/// option and is stored as [`crate::Observe::Requested`].
/// `Deregister` is the value `1`.
///
/// In notifications sent by the server the option carries a sequence
/// number instead, which has no `Action`.
#[derive(Hash, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Action {
  /// Add the requesting endpoint & token to the resource's observers
  Register,
  /// Remove the requesting endpoint & token from the resource's observers
  Deregister,
}

impl Action {
  /// Interpret the integer value of an Observe option sent in a request
  pub fn from_value(n: u32) -> Option<Self> {
    match n {
      | 0 => Some(Self::Register),
      | 1 => Some(Self::Deregister),
      | _ => None,
    }
  }

  /// Integer value this action is sent as
  pub fn value(self) -> u32 {
    match self {
      | Self::Register => 0,
      | Self::Deregister => 1,
    }
  }
}

impl From<Action> for u8 {
  fn from(a: Action) -> Self {
    a.value() as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn values() {
    assert_eq!(Action::from_value(0), Some(Action::Register));
    assert_eq!(Action::from_value(1), Some(Action::Deregister));
    assert_eq!(Action::from_value(2), None);
    assert_eq!(u8::from(Action::Deregister), 1);
    assert_eq!(Action::Register.value(), 0);
  }
}
