use crate::opt::table::Blockwise;

/// Runtime configuration for a [`crate::Codec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Config {
  /// Largest payload sent in a single message before switching to
  /// a blockwise transfer (RFC7959); only the first block is sent and
  /// Block / Size options describing it are added when the message
  /// does not already carry them.
  ///
  /// `0` disables blockwise transfers; any other value must be a block
  /// size RFC7959 allows (16, 32, .., 1024) or serializing fails with
  /// [`crate::MessageToBytesError::InvalidBlockwiseLimit`].
  ///
  /// Defaults to `0`:
  /// ```
  /// use sncoap_msg::config::Config;
  ///
  /// assert_eq!(Config::default().blockwise_payload_size, 0);
  /// assert!(!Config::default().blockwise_enabled());
  /// ```
  pub blockwise_payload_size: u16,
}

impl Config {
  /// Config sending payloads longer than `size` in blocks of `size` bytes.
  ///
  /// `None` unless `size` is `0` or a block size (16, 32, .., 1024).
  ///
  /// ```
  /// use sncoap_msg::config::Config;
  ///
  /// let config = Config::blockwise(256).unwrap();
  /// assert_eq!(config.blockwise_payload_size, 256);
  /// assert!(config.blockwise_enabled());
  ///
  /// assert_eq!(Config::blockwise(100), None);
  /// assert_eq!(Config::blockwise(2048), None);
  /// ```
  pub const fn blockwise(size: u16) -> Option<Self> {
    if Blockwise::valid_limit(size) {
      Some(Self { blockwise_payload_size: size })
    } else {
      None
    }
  }

  /// Will payloads ever be split into blocks?
  pub const fn blockwise_enabled(&self) -> bool {
    self.blockwise_payload_size > 0
  }
}
