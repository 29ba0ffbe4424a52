//! Storage and writer primitives shared by the `sncoap` crates.
//!
//! Nothing in here knows about CoAP; these are the small pieces the message
//! codec needs in order to run without (or with) a heap:
//! - [`Buffer`]: fallible byte storage on top of [`toad_array::Array`]
//! - [`Writer`]: a bounds-checked writer over a caller-owned byte slice
//!
//! Reading goes through [`toad_cursor::Cursor`](https://docs.rs/toad-cursor).

#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![allow(clippy::unused_unit)]
#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc as std_alloc;

/// Buffer
pub mod buffer;
pub use buffer::*;

/// Writer
pub mod writer;
pub use writer::*;
