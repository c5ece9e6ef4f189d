//! A streaming OGG Opus packet demuxer
//!
//! This reads a single, non-multiplexed OGG stream page by page and writes the packets it
//! contains to a [`Write`](std::io::Write)r in stream order. Packets that span multiple
//! pages are written in multiple calls (one per page), so memory use is bounded by a
//! single page no matter how large a packet is.
//!
//! This does *not* verify checksums, interpret granule positions or sequence numbers, or
//! attempt to resynchronize after a corrupt page. Any malformed page ends the decode.
//!
//! # Examples
//!
//! ```rust
//! # fn main() -> ogg_demux::Result<()> {
//! // A page containing two packets: "Opus" and "Head"
//! let mut page: Vec<u8> = Vec::new();
//! page.extend(b"OggS");
//! page.extend([0; 22]);
//! page.extend([2, 4, 4]);
//! page.extend(b"OpusHead");
//!
//! let mut packets: Vec<u8> = Vec::new();
//! ogg_demux::decode(&mut page.as_slice(), &mut packets)?;
//!
//! assert_eq!(packets, b"OpusHead");
//! # Ok(()) }
//! ```

mod config;
mod decode;
mod error;
mod header;
mod packets;
mod reader;

pub use config::{DecodeOptions, ParsingMode};
pub use decode::{DecodeSummary, Decoder, decode, decode_buffered, decode_with_buffer};
pub use error::{PageError, PageSection, Result};
pub use header::PageHeader;
pub use packets::{PageSummary, write_packets};
pub use reader::{Page, PageReader};

/// The size of a page header, excluding the segment table
pub const HEADER_SIZE: usize = 27;
/// The magic signature at the start of every page
pub const CAPTURE_PATTERN: [u8; 4] = *b"OggS";
/// The offset of the segment count within the page header
pub const SEGMENT_COUNT_OFFSET: usize = 26;
/// The maximum size of a single segment
pub const MAX_SEGMENT_SIZE: usize = 255;
/// The maximum page content size
pub const MAX_PACKET_SIZE: usize = MAX_SEGMENT_SIZE * 255;
/// The maximum size of an entire page, header and segment table included
pub const MAX_PAGE_SIZE: usize = HEADER_SIZE + MAX_SEGMENT_SIZE + MAX_PACKET_SIZE;
