use crate::{CAPTURE_PATTERN, HEADER_SIZE, PageError, Result, SEGMENT_COUNT_OFFSET};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

/// An OGG page header
///
/// Only [`PageHeader::segments`] is needed to split a page into packets. The remaining
/// fields are decoded for diagnostics, and are never validated against each other.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PageHeader {
	/// The stream structure version, always 0 in a valid stream
	pub version: u8,
	pub(crate) header_type_flag: u8,
	/// The page's absolute granule position
	pub abgp: u64,
	/// The page's stream serial number
	pub stream_serial: u32,
	/// The page's sequence number
	pub sequence_number: u32,
	pub(crate) checksum: u32,
	/// The number of entries in the page's segment table
	pub segments: u8,
}

impl PageHeader {
	/// Parses the fixed portion of a page header
	///
	/// # Errors
	///
	/// * The header doesn't start with `OggS`
	/// * The header declares a segment count < 1
	pub fn parse(header: &[u8; HEADER_SIZE]) -> Result<Self> {
		let (sig, mut fields) = header[..SEGMENT_COUNT_OFFSET].split_at(4);

		if sig != &CAPTURE_PATTERN[..] {
			let mut found = [0; 4];
			found.copy_from_slice(sig);
			return Err(PageError::InvalidCapturePattern(found));
		}

		let segments = header[SEGMENT_COUNT_OFFSET];
		if segments < 1 {
			return Err(PageError::BadSegmentCount);
		}

		Ok(Self::read_fields(&mut fields, segments)?)
	}

	fn read_fields<R>(data: &mut R, segments: u8) -> std::io::Result<Self>
	where
		R: Read,
	{
		Ok(Self {
			version: data.read_u8()?,
			header_type_flag: data.read_u8()?,
			abgp: data.read_u64::<LittleEndian>()?,
			stream_serial: data.read_u32::<LittleEndian>()?,
			sequence_number: data.read_u32::<LittleEndian>()?,
			checksum: data.read_u32::<LittleEndian>()?,
			segments,
		})
	}

	/// Returns the page's header type flag
	pub fn header_type_flag(&self) -> u8 {
		self.header_type_flag
	}

	/// Returns the page's checksum
	///
	/// NOTE: This is reported as stored, it is never verified.
	pub fn checksum(&self) -> u32 {
		self.checksum
	}
}
