/// Iterator over the wire-level occurrences of an option value.
///
/// Repeatable options store every occurrence in one buffer,
/// joined by a separator byte. Splitting rules:
/// - one leading separator is ignored
/// - one trailing separator is ignored
/// - every other separator ends a part, so interior empty parts are kept
///
/// Options that are not repeatable have no separator and yield
/// their whole value as a single part.
///
/// ```
/// use sncoap_msg::opt::Parts;
///
/// let parts = Parts::split(b"/a/bc/", b'/').collect::<Vec<_>>();
/// assert_eq!(parts, vec![b"a".as_ref(), b"bc".as_ref()]);
///
/// let parts = Parts::split(b"a&&b", b'&').collect::<Vec<_>>();
/// assert_eq!(parts, vec![b"a".as_ref(), b"".as_ref(), b"b".as_ref()]);
///
/// let parts = Parts::whole(b"a/b").collect::<Vec<_>>();
/// assert_eq!(parts, vec![b"a/b".as_ref()]);
/// ```
#[derive(Clone, Debug)]
pub struct Parts<'a> {
  rest: Option<&'a [u8]>,
  sep: Option<u8>,
}

impl<'a> Parts<'a> {
  /// Split a repeatable option value on `sep`
  pub fn split(value: &'a [u8], sep: u8) -> Self {
    let value = value.strip_prefix(&[sep]).unwrap_or(value);
    let value = value.strip_suffix(&[sep]).unwrap_or(value);

    Self { rest: Some(value),
           sep: Some(sep) }
  }

  /// Yield `value` as the only part
  pub fn whole(value: &'a [u8]) -> Self {
    Self { rest: Some(value),
           sep: None }
  }
}

impl<'a> Iterator for Parts<'a> {
  type Item = &'a [u8];

  fn next(&mut self) -> Option<Self::Item> {
    let rest = self.rest?;

    match self.sep.and_then(|sep| rest.iter().position(|b| *b == sep)) {
      | Some(ix) => {
        self.rest = Some(&rest[ix + 1..]);
        Some(&rest[..ix])
      },
      | None => {
        self.rest = None;
        Some(rest)
      },
    }
  }
}
