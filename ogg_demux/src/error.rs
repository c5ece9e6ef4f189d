use std::error::Error;
use std::fmt;

/// Alias for `Result<T, PageError>`
pub type Result<T> = std::result::Result<T, PageError>;

/// The part of a page that was being read when the stream ended
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageSection {
	/// The fixed 27 byte header
	Header,
	/// The lacing values following the header
	SegmentTable,
	/// The packet data described by the segment table
	Payload,
}

impl fmt::Display for PageSection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PageSection::Header => write!(f, "page header"),
			PageSection::SegmentTable => write!(f, "segment table"),
			PageSection::Payload => write!(f, "page payload"),
		}
	}
}

/// Errors that can occur while demuxing an OGG stream
///
/// Every error is fatal to the decode that produced it. A stream that ends cleanly on a
/// page boundary is not an error.
#[derive(Debug)]
pub enum PageError {
	/// The stream ended partway through a page
	Truncated {
		/// The structure that was cut short
		section: PageSection,
		/// The number of bytes the structure requires
		expected: usize,
		/// The number of bytes that were available
		read: usize,
	},
	/// The reader contains a page without a magic signature (OggS)
	InvalidCapturePattern([u8; 4]),
	/// The reader contains a page with a segment count < 1
	BadSegmentCount,
	/// The reader contains a page with a nonzero version
	///
	/// This is only raised with [`ParsingMode::Strict`](crate::ParsingMode::Strict).
	InvalidVersion(u8),
	/// The provided scratch buffer cannot hold a page of [`MAX_PAGE_SIZE`](crate::MAX_PAGE_SIZE)
	BufferTooSmall {
		/// The length of the provided buffer
		len: usize,
	},
	/// The writer rejected packet data
	SinkWrite(std::io::Error),
	/// Any std::io::Error raised by the reader
	Io(std::io::Error),
}

impl fmt::Display for PageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PageError::Truncated {
				section,
				expected,
				read,
			} => write!(
				f,
				"Stream ended inside the {section} (expected {expected} bytes, got {read})"
			),
			PageError::InvalidCapturePattern(found) => write!(
				f,
				"Page is missing a magic signature, found {:?} ({found:02x?})",
				String::from_utf8_lossy(found)
			),
			PageError::BadSegmentCount => write!(f, "Page has a segment count < 1"),
			PageError::InvalidVersion(version) => write!(
				f,
				"Invalid stream structure version {version} (Should always be 0)"
			),
			PageError::BufferTooSmall { len } => write!(
				f,
				"Buffer is too small ({len} bytes, need at least {})",
				crate::MAX_PAGE_SIZE
			),
			PageError::SinkWrite(err) => write!(f, "Failed to write a packet: {}", err),
			PageError::Io(err) => write!(f, "{}", err),
		}
	}
}

impl Error for PageError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match *self {
			PageError::SinkWrite(ref e) | PageError::Io(ref e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for PageError {
	fn from(err: std::io::Error) -> PageError {
		PageError::Io(err)
	}
}
