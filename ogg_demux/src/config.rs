use crate::MAX_PAGE_SIZE;

/// The parsing strictness mode
///
/// This only affects header fields that do not take part in packet reassembly. Framing
/// errors (a bad capture pattern, an empty segment table, a truncated page) are fatal in
/// every mode.
///
/// # Examples
///
/// ```rust
/// use ogg_demux::{DecodeOptions, ParsingMode};
///
/// // We only want to accept spec-compliant pages
/// let options = DecodeOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// A page with a nonzero stream structure version is rejected with
	/// [`PageError::InvalidVersion`](crate::PageError::InvalidVersion).
	Strict,
	/// Default mode, a nonzero stream structure version is logged and otherwise ignored
	#[default]
	BestAttempt,
	/// Least eager to error, unexpected header fields are silently ignored
	Relaxed,
}

/// Options to control how a [`Decoder`](crate::Decoder) reads a stream
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct DecodeOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_ahead_capacity: usize,
}

impl Default for DecodeOptions {
	/// The default implementation for `DecodeOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// DecodeOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	read_ahead_capacity: MAX_PAGE_SIZE,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl DecodeOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default capacity of the read-ahead buffer used by [`Decoder::decode_buffered`](crate::Decoder::decode_buffered)
	pub const DEFAULT_READ_AHEAD_CAPACITY: usize = MAX_PAGE_SIZE;

	/// Creates a new `DecodeOptions`, alias for `Default` implementation
	///
	/// See also: [`DecodeOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_demux::DecodeOptions;
	///
	/// let options = DecodeOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_ahead_capacity: Self::DEFAULT_READ_AHEAD_CAPACITY,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_demux::{DecodeOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let options = DecodeOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// The capacity of the read-ahead buffer wrapped around the reader in
	/// [`Decoder::decode_buffered`](crate::Decoder::decode_buffered)
	///
	/// This never affects the output, only how many calls are made to the underlying reader.
	/// A capacity of 0 disables read-ahead entirely.
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_demux::DecodeOptions;
	///
	/// // My reader is a socket with large frames, read ahead further
	/// let options = DecodeOptions::new().read_ahead_capacity(DecodeOptions::DEFAULT_READ_AHEAD_CAPACITY * 4);
	/// ```
	pub fn read_ahead_capacity(&mut self, read_ahead_capacity: usize) -> Self {
		self.read_ahead_capacity = read_ahead_capacity;
		*self
	}
}
