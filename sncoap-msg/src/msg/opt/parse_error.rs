use super::OptNumber;

/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum OptParseError {
  /// Reached end of stream before parsing was finished
  UnexpectedEndOfStream,

  /// Option Delta was set to 15, which is invalid.
  OptionDeltaReservedValue(u8),

  /// Value Length was set to 15, which is invalid.
  ValueLengthReservedValue(u8),

  /// A known option had a value outside of the length range allowed for it
  #[allow(missing_docs)]
  InvalidLength { number: OptNumber, len: usize },

  /// An option that may only appear once appeared again
  Repeated(OptNumber),

  /// An option we do not understand was marked as critical
  UnrecognizedCritical(OptNumber),
}

impl OptParseError {
  /// Shorthand for [`OptParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}
