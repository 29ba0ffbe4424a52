//! Low-level representation of CoAP messages, and a compact codec for them.
//!
//! The most notable item in `sncoap_msg` is `Message`;
//! a CoAP message very close to the actual byte layout.
//!
//! Four operations are provided:
//! - [`calculate_size`]: the exact number of bytes a message will occupy on the wire
//! - [`build`]: serialize a message into a caller-supplied buffer of that size
//! - [`parse`]: the inverse of [`build`]
//! - [`build_response`]: derive the skeleton of a response from a request
//!
//! [`Codec`] bundles these with a [`config::Config`].
//!
//! ## Allocation
//! CoAP messages have some attributes whose size is dynamic:
//! - The message payload (in http terms: the request/response body)
//! - the token
//! - the value of an option (in http terms: header value)
//!
//! `Message` does not require an allocator and has no opinions about what kind of collection
//! it uses internally to store these values.
//!
//! It solves this problem by being generic over a single byte buffer type and uses the
//! [`Buffer`](sncoap_common::Buffer) trait to capture its idea of what makes a collection useful.
//! Every byte `toad_array::Array` is a `Buffer`.
//!
//! This means that you may use a provided implementation (for `Vec` or `tinyvec::ArrayVec`)
//! or provide your own collection by implementing `toad_array::Array`.
//!
//! ```rust
//! //! Note: both of these type aliases are exported by `sncoap_msg` for convenience.
//!
//! use tinyvec::ArrayVec;
//! use sncoap_msg::Message;
//!
//! type VecMessage = Message<Vec<u8>>;
//!
//! // Used like: `ArrayVecMessage<1024>`; a message where the payload and every
//! // option value can hold up to 1024 bytes.
//! type ArrayVecMessage<const N: usize> = Message<ArrayVec<[u8; N]>>;
//! ```
//!
//! ## Blockwise transfers
//! Every serializing operation takes a `blockwise_limit`. When it is nonzero and the
//! payload is longer, only the first `blockwise_limit` bytes of the payload are sent and
//! RFC7959 Block / Size options describing them are added:
//! Block1 & Size1 for requests, Block2 & Size2 for responses.
//!
//! ## Performance
//! This crate uses `criterion` to measure performance of the heaped & heapless implementations in this crate as well as `coap_lite::Packet`.

#![doc(html_root_url = "https://docs.rs/sncoap-msg/0.1.0")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc as std_alloc;

mod codec;
mod logging;
mod response;
mod size;

/// Codec configuration
pub mod config;

#[doc(hidden)]
pub mod from_bytes;

/// Message structs
pub mod msg;

#[doc(hidden)]
pub mod to_bytes;

pub use codec::Codec;
#[doc(inline)]
pub use from_bytes::{parse, MessageFromBytesError, TryFromBytes};
#[doc(inline)]
pub use msg::*;
pub use response::{build_response, ResponseError};
pub use size::calculate_size;
#[doc(inline)]
pub use to_bytes::{build, build_into, MessageToBytesError, TryIntoBytes};

/// Type aliases for std or alloc platforms
#[cfg(feature = "alloc")]
pub mod alloc {
  use std_alloc::vec::Vec;

  /// [`crate::Message`] that uses Vec
  pub type Message = crate::Message<Vec<u8>>;
}

/// [`crate::Message`] that uses Vec
#[cfg(feature = "alloc")]
pub type VecMessage = alloc::Message;

/// [`crate::Message`] stored inline; the payload, token and every
/// option value may hold up to `N` bytes.
pub type ArrayVecMessage<const N: usize> = Message<tinyvec::ArrayVec<[u8; N]>>;

#[cfg(test)]
mod round_trip;

#[cfg(test)]
pub(crate) fn test_msg() -> (alloc::Message, Vec<u8>) {
  //                       version  token len  code (2.05 Content)
  //                       |        |          /
  //                       |  type  |         /  message ID
  //                       |  |     |        |   |
  //                       vv vv vvvv vvvvvvvv vvvvvvvvvvvvvvvv
  let header: [u8; 4] = 0b_01_00_0001_01000101_0000000000000001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  //                     Uri-Path "a"          Content-Format: 50 (json)
  let options: [&[u8]; 2] = [&[0b_1011_0001u8, b'a'], &[0b_0001_0001u8, 50]];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let msg = alloc::Message { id: Id(1),
                             ty: Type::Con,
                             ver: Version(1),
                             token: Some(vec![254]),
                             uri_path: Some(b"a".to_vec()),
                             content_format: Some(vec![50]),
                             opts: None,
                             code: Code { class: 2,
                                          detail: 5 },
                             payload: Payload(b"hello, world!".to_vec()),
                             status: Status::Ok };
  (msg, bytes)
}
