/// Version of the CoAP protocol that the message adheres to.
///
/// RFC7252 defines version 1, the only version this crate will
/// serialize; the field is 2 bits wide on the wire.
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub struct Version(pub u8);

impl Version {
  /// Is this a version we are able to put on the wire?
  pub fn is_supported(&self) -> bool {
    *self == Version::default()
  }
}

impl Default for Version {
  fn default() -> Self {
    Version(1)
  }
}
