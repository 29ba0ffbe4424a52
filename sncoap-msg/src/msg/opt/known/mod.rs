/// Block1 / Block2 values
pub mod block;
pub use block::*;

/// Content-Format values
pub mod content_format;
pub use content_format::*;

/// Observe values
pub mod observe;
pub use observe::*;

macro_rules! opt {
  (rfc7252($section:literal) $name:ident = $n:literal) => {
    #[doc = ::toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
  (#[doc = $doc:expr] $name:ident = $n:literal) => {
    #[doc = $doc]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
}

pub(crate) use opt;

/// Options that appear at most once in a message
pub mod no_repeat {
  use super::opt;

  opt!(rfc7252("5.10.1") HOST = 3);
  opt!(#[doc = "Observe (RFC7641): register or deregister interest in a resource, \
                 or the sequence number of a notification"]
       OBSERVE = 6);
  opt!(#[doc = "See [`HOST`]"]
       PORT = 7);
  opt!(rfc7252("5.10.3") CONTENT_FORMAT = 12);
  opt!(rfc7252("5.10.5") MAX_AGE = 14);
  opt!(#[doc = "Block2 (RFC7959): a block of the response payload"]
       BLOCK2 = 23);
  opt!(#[doc = "Block1 (RFC7959): a block of the request payload"]
       BLOCK1 = 27);
  opt!(#[doc = "Size2 (RFC7959): total size of the response payload"]
       SIZE2 = 28);
  opt!(rfc7252("5.10.2") PROXY_URI = 35);
  opt!(rfc7252("5.10.9") SIZE1 = 60);
}

/// Options that may appear more than once in a message
///
/// A single stored value holds every occurrence, joined by
/// [`PATH_SEPARATOR`] (Uri-Path, Location-Path) or
/// [`QUERY_SEPARATOR`] (everything else).
pub mod repeat {
  use super::opt;

  /// Joins Uri-Path and Location-Path segments
  pub const PATH_SEPARATOR: u8 = b'/';

  /// Joins occurrences of every other repeatable option
  pub const QUERY_SEPARATOR: u8 = b'&';

  opt!(#[doc = concat!(
                toad_macros::rfc_7252_doc!("5.10.6"),
                "\n<details><summary>ETag as a Request Option</summary>\n\n",
                toad_macros::rfc_7252_doc!("5.10.6.2"),
                "\n</details><details><summary>ETag as a Response Option</summary>\n\n",
                toad_macros::rfc_7252_doc!("5.10.6.1"),
                "</details>"
      )]
       ETAG = 4);
  opt!(rfc7252("5.10.7") LOCATION_PATH = 8);
  opt!(#[doc = "See [`super::no_repeat::HOST`]"]
       PATH = 11);
  opt!(#[doc = "See [`super::no_repeat::HOST`]"]
       QUERY = 15);
  opt!(rfc7252("5.10.4") ACCEPT = 17);
  opt!(#[doc = "See [`LOCATION_PATH`]"]
       LOCATION_QUERY = 20);
}
