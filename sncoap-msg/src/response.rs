use sncoap_common::{AllocError, Buffer};

use crate::{Code, Id, Message, Type};

/// Why a response could not be derived from a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseError {
  /// Only CON and NON requests are answered
  UnsupportedRequestType(Type),
  /// The token could not be copied into the response
  Alloc(AllocError),
}

/// Create the skeleton of a response to `req`.
///
/// - a CON request gets an ACK with the same message id (a piggybacked response)
/// - a NON request gets a NON with message id `0`; the caller must assign a fresh one
///
/// The request's token is copied into the response; nothing else is.
///
/// ```
/// use sncoap_msg::{build_response, Code, Id, ResponseError, Type, VecMessage};
///
/// let req = VecMessage::new(Type::Con, Code::GET, Id(12));
/// let resp = build_response(&req, Code::CONTENT).unwrap();
///
/// assert_eq!(resp.ty, Type::Ack);
/// assert_eq!(resp.code, Code::CONTENT);
/// assert_eq!(resp.id, Id(12));
///
/// let ack = VecMessage::new(Type::Ack, Code::EMPTY, Id(12));
/// assert_eq!(build_response(&ack, Code::CONTENT),
///            Err(ResponseError::UnsupportedRequestType(Type::Ack)));
/// ```
pub fn build_response<B: Buffer>(req: &Message<B>, code: Code) -> Result<Message<B>, ResponseError> {
  let (ty, id) = match req.ty {
    | Type::Con => (Type::Ack, req.id),
    | Type::Non => (Type::Non, Id(0)),
    | other => {
      log::warn!("cannot respond to a {:?} message (id {})", other, req.id.0);
      return Err(ResponseError::UnsupportedRequestType(other));
    },
  };

  let token = req.token
                 .as_deref()
                 .map(B::try_copy_from)
                 .transpose()
                 .map_err(|e| {
                   log::warn!("could not copy token of request {}: {:?}", req.id.0, e);
                   ResponseError::Alloc(e)
                 })?;

  Ok(Message { token,
               ..Message::new(ty, code, id) })
}
