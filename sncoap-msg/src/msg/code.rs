use core::fmt;

use toad_macros::rfc_7252_doc;

#[doc = rfc_7252_doc!("12.1")]
/// <details><summary><b>RFC7252 Section 12.1.1 Method Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.1"))]
/// </details>
/// <details><summary><b>RFC7252 Section 12.1.2 Response Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.2"))]
/// </details>
///
/// # Examples
/// ```
/// use sncoap_msg::Code;
/// assert_eq!(Code { class: 2, detail: 5 }.to_string(), "2.05".to_string())
/// ```
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub struct Code {
  /// The "class" of message codes identify it as a request or response, and provides the class of response status:
  ///
  /// |class|meaning|
  /// |---|---|
  /// |`0`|Message is a request|
  /// |`2`|Message is a success response|
  /// |`4`|Message is a client error response|
  /// |`5`|Message is a server error response|
  pub class: u8,

  /// 2-digit integer (range `[0, 32)`) that provides granular information about the response status.
  ///
  /// Will always be `0` for requests.
  pub detail: u8,
}

/// Whether a code is a request, response, or empty message
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum CodeKind {
  /// Code `0.00`
  Empty,
  /// Code `0.xx`
  Request,
  /// Code `2.xx`, `4.xx`, `5.xx`
  Response,
}

impl Code {
  /// `0.00`
  pub const EMPTY: Self = Self::new(0, 0);
  /// `0.01`
  pub const GET: Self = Self::new(0, 1);
  /// `0.02`
  pub const POST: Self = Self::new(0, 2);
  /// `0.03`
  pub const PUT: Self = Self::new(0, 3);
  /// `0.04`
  pub const DELETE: Self = Self::new(0, 4);
  /// `2.01`
  pub const CREATED: Self = Self::new(2, 1);
  /// `2.02`
  pub const DELETED: Self = Self::new(2, 2);
  /// `2.03`
  pub const VALID: Self = Self::new(2, 3);
  /// `2.04`
  pub const CHANGED: Self = Self::new(2, 4);
  /// `2.05`
  pub const CONTENT: Self = Self::new(2, 5);
  /// `2.31`
  pub const CONTINUE: Self = Self::new(2, 31);
  /// `4.00`
  pub const BAD_REQUEST: Self = Self::new(4, 0);
  /// `4.01`
  pub const UNAUTHORIZED: Self = Self::new(4, 1);
  /// `4.02`
  pub const BAD_OPTION: Self = Self::new(4, 2);
  /// `4.03`
  pub const FORBIDDEN: Self = Self::new(4, 3);
  /// `4.04`
  pub const NOT_FOUND: Self = Self::new(4, 4);
  /// `4.05`
  pub const METHOD_NOT_ALLOWED: Self = Self::new(4, 5);
  /// `4.06`
  pub const NOT_ACCEPTABLE: Self = Self::new(4, 6);
  /// `4.08`
  pub const REQUEST_ENTITY_INCOMPLETE: Self = Self::new(4, 8);
  /// `4.12`
  pub const PRECONDITION_FAILED: Self = Self::new(4, 12);
  /// `4.13`
  pub const REQUEST_ENTITY_TOO_LARGE: Self = Self::new(4, 13);
  /// `4.15`
  pub const UNSUPPORTED_CONTENT_FORMAT: Self = Self::new(4, 15);
  /// `5.00`
  pub const INTERNAL_SERVER_ERROR: Self = Self::new(5, 0);
  /// `5.01`
  pub const NOT_IMPLEMENTED: Self = Self::new(5, 1);
  /// `5.02`
  pub const BAD_GATEWAY: Self = Self::new(5, 2);
  /// `5.03`
  pub const SERVICE_UNAVAILABLE: Self = Self::new(5, 3);
  /// `5.04`
  pub const GATEWAY_TIMEOUT: Self = Self::new(5, 4);
  /// `5.05`
  pub const PROXYING_NOT_SUPPORTED: Self = Self::new(5, 5);

  /// Create a new Code
  ///
  /// ```
  /// use sncoap_msg::Code;
  ///
  /// let content = Code::new(2, 05);
  /// assert_eq!(content, Code::CONTENT);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Self {
    Self { class, detail }
  }

  /// Get whether this code is for a request, response, or empty message
  ///
  /// ```
  /// use sncoap_msg::{Code, CodeKind};
  ///
  /// assert_eq!(Code::EMPTY.kind(), CodeKind::Empty);
  /// assert_eq!(Code::GET.kind(), CodeKind::Request);
  /// assert_eq!(Code::NOT_FOUND.kind(), CodeKind::Response);
  /// ```
  pub fn kind(&self) -> CodeKind {
    match (self.class, self.detail) {
      | (0, 0) => CodeKind::Empty,
      | (0, _) => CodeKind::Request,
      | _ => CodeKind::Response,
    }
  }

  /// Whether blockwise transfers of a message with this code
  /// travel in Block1 / Size1 (requests) rather than Block2 / Size2 (responses).
  ///
  /// Anything numerically below `2.01 Created` counts as request-side,
  /// which includes the empty code.
  ///
  /// ```
  /// use sncoap_msg::Code;
  ///
  /// assert!(Code::POST.is_request_side());
  /// assert!(Code::EMPTY.is_request_side());
  /// assert!(!Code::CREATED.is_request_side());
  /// ```
  pub fn is_request_side(&self) -> bool {
    u8::from(*self) < u8::from(Code::CREATED)
  }

  /// Can this code be put on the wire?
  ///
  /// The class must be one RFC7252 assigns (request, success, client error, server error)
  /// and the detail must fit in 5 bits.
  ///
  /// ```
  /// use sncoap_msg::Code;
  ///
  /// assert!(Code::CONTENT.is_valid());
  /// assert!(!Code::new(3, 0).is_valid());
  /// assert!(!Code::new(2, 32).is_valid());
  /// ```
  pub fn is_valid(&self) -> bool {
    matches!(self.class, 0 | 2 | 4 | 5) && self.detail < 32
  }

  /// Get the human string representation of a message code
  ///
  /// # Returns
  /// A `char` array
  ///
  /// This is to avoid unnecessary heap allocation,
  /// you can create a `String` with `FromIterator::<String>::from_iter`,
  /// or use the [`Display`](core::fmt::Display) implementation.
  /// ```
  /// use sncoap_msg::Code;
  ///
  /// let code = Code { class: 2, detail: 5 };
  /// let chars = code.to_human();
  /// let string = String::from_iter(chars);
  /// assert_eq!(string, "2.05".to_string());
  /// ```
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| (b'0' + d % 10) as char;
    [to_char(self.class),
     '.',
     to_char(self.detail / 10),
     to_char(self.detail % 10)]
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.to_human().iter().try_for_each(|c| fmt::Write::write_char(f, *c))
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Self {
    let class = b >> 5;
    let detail = b & 0b0011111;

    Code { class, detail }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    let class = code.class << 5;
    let detail = code.detail & 0b0011111;

    class | detail
  }
}
