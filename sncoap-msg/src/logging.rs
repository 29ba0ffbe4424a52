use core::fmt;

use sncoap_common::Buffer;

use crate::Message;

/// One-line description of a message for log output,
/// e.g. `Response: Ack 2.05 (id 12) with 5 byte payload`
pub(crate) struct Summary<'a, B>(pub(crate) &'a Message<B>);

impl<'a, B: Buffer> fmt::Display for Summary<'a, B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = self.0;
    write!(f,
           "{:?}: {:?} {} (id {}) with {} byte payload",
           msg.code.kind(),
           msg.ty,
           msg.code,
           msg.id.0,
           msg.payload.0.len())
  }
}
