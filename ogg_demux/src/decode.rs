use crate::MAX_PAGE_SIZE;
use crate::config::{DecodeOptions, ParsingMode};
use crate::error::{PageError, Result};
use crate::header::PageHeader;
use crate::packets::write_packets;
use crate::reader::PageReader;

use std::io::{BufReader, Read, Write};

/// Totals for a completed decode
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct DecodeSummary {
	/// The number of pages read
	pub pages: usize,
	/// The number of packets completed
	pub packets: usize,
	/// The number of writes issued to the writer
	pub writes: usize,
	/// The number of packet bytes written
	pub bytes: u64,
	/// The number of pages with a nonzero stream structure version that were let through
	pub invalid_versions: usize,
}

/// Drives a [`PageReader`] over a stream, writing every packet it finds
///
/// See [`decode`](crate::decode) for the basic usage without options.
///
/// # Examples
///
/// ```rust
/// use ogg_demux::{DecodeOptions, Decoder, ParsingMode};
///
/// # fn main() -> ogg_demux::Result<()> {
/// let mut stream: &[u8] = &[];
/// let mut packets: Vec<u8> = Vec::new();
///
/// let decoder = Decoder::new(DecodeOptions::new().parsing_mode(ParsingMode::Strict));
/// let summary = decoder.decode(&mut stream, &mut packets)?;
///
/// assert_eq!(summary.pages, 0);
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct Decoder {
	options: DecodeOptions,
}

impl Decoder {
	/// Creates a new `Decoder`
	pub fn new(options: DecodeOptions) -> Self {
		Self { options }
	}

	/// Returns the decoder's options
	pub fn options(&self) -> DecodeOptions {
		self.options
	}

	/// Decode `reader` into `writer`, allocating a scratch buffer of [`MAX_PAGE_SIZE`]
	///
	/// # Errors
	///
	/// See [`Decoder::decode_with_buffer`]
	pub fn decode<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<DecodeSummary>
	where
		R: Read,
		W: Write,
	{
		let mut buf = vec![0; MAX_PAGE_SIZE];
		self.decode_with_buffer(reader, writer, &mut buf)
	}

	/// Same as [`Decoder::decode`], wrapping `reader` in a [`BufReader`]
	///
	/// The capacity of the `BufReader` is set by [`DecodeOptions::read_ahead_capacity`].
	///
	/// NOTE: The `BufReader` may read past the final page, any bytes it buffered are
	///       consumed from `reader` and discarded.
	///
	/// # Errors
	///
	/// See [`Decoder::decode_with_buffer`]
	pub fn decode_buffered<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<DecodeSummary>
	where
		R: Read,
		W: Write,
	{
		let mut reader = BufReader::with_capacity(self.options.read_ahead_capacity, reader);
		self.decode(&mut reader, writer)
	}

	/// Decode `reader` into `writer` using `buf` as scratch space
	///
	/// This will read pages until the reader is exhausted at a page boundary, writing the
	/// packet data of each page as it is read. See [`write_packets`] for how packets are
	/// written.
	///
	/// `buf` can be reused across calls to avoid reallocating, its contents are overwritten.
	///
	/// # Errors
	///
	/// * `buf` is smaller than [`MAX_PAGE_SIZE`] ([`PageError::BufferTooSmall`]), nothing is read
	/// * The stream is malformed, see [`PageReader::next_page`]
	/// * [`ParsingMode::Strict`] and a page has a nonzero version ([`PageError::InvalidVersion`])
	/// * `writer` fails ([`PageError::SinkWrite`])
	pub fn decode_with_buffer<R, W>(
		&self,
		reader: &mut R,
		writer: &mut W,
		buf: &mut [u8],
	) -> Result<DecodeSummary>
	where
		R: Read,
		W: Write,
	{
		let mut pages = PageReader::new(reader, buf)?;
		let mut summary = DecodeSummary::default();

		while let Some(page) = pages.next_page()? {
			if !self.check_version(page.header())? {
				// Only report the first one, a bad muxer will stamp every page
				if summary.invalid_versions == 0 {
					log::warn!(
						"Page {} has an invalid stream structure version ({}), ignoring",
						page.header().sequence_number,
						page.header().version
					);
				}

				summary.invalid_versions += 1;
			}

			let page_summary = write_packets(writer, page.segment_table(), page.payload())?;

			summary.pages += 1;
			summary.packets += page_summary.packets;
			summary.writes += page_summary.writes;
			summary.bytes += page_summary.bytes as u64;
		}

		log::debug!(
			"Reached the end of the stream after {} pages ({} packets, {} bytes)",
			summary.pages,
			summary.packets,
			summary.bytes
		);

		if summary.invalid_versions > 1 {
			log::debug!(
				"{} pages had an invalid stream structure version",
				summary.invalid_versions
			);
		}

		Ok(summary)
	}

	// Returns `false` for a nonzero version that should be reported
	fn check_version(&self, header: &PageHeader) -> Result<bool> {
		if header.version == 0 {
			return Ok(true);
		}

		match self.options.parsing_mode {
			ParsingMode::Strict => Err(PageError::InvalidVersion(header.version)),
			ParsingMode::BestAttempt => Ok(false),
			ParsingMode::Relaxed => Ok(true),
		}
	}
}

/// Decodes the OGG stream in `reader`, writing each packet to `writer`
///
/// This allocates a scratch buffer of [`MAX_PAGE_SIZE`]. To reuse a buffer, see [`decode_with_buffer`].
///
/// # Errors
///
/// See [`Decoder::decode_with_buffer`]
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
///
/// # fn main() -> ogg_demux::Result<()> {
/// let mut file = File::open("foo.opus")?;
/// let mut packets: Vec<u8> = Vec::new();
///
/// ogg_demux::decode(&mut file, &mut packets)?;
/// # Ok(()) }
/// ```
pub fn decode<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
	R: Read,
	W: Write,
{
	Decoder::default().decode(reader, writer).map(|_| ())
}

/// Same as [`decode`], wrapping `reader` in a [`BufReader`] of [`MAX_PAGE_SIZE`]
///
/// This greatly reduces the number of reads made on `reader`, which is useful for
/// unbuffered readers such as a [`File`](std::fs::File).
///
/// # Errors
///
/// See [`Decoder::decode_with_buffer`]
pub fn decode_buffered<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
	R: Read,
	W: Write,
{
	Decoder::default()
		.decode_buffered(reader, writer)
		.map(|_| ())
}

/// Same as [`decode`], using `buf` as scratch space
///
/// # Errors
///
/// * `buf` is smaller than [`MAX_PAGE_SIZE`], nothing will be read from `reader`
/// * See [`Decoder::decode_with_buffer`]
///
/// # Examples
///
/// ```rust
/// use ogg_demux::{MAX_PAGE_SIZE, PageError};
///
/// let mut buf = vec![0; MAX_PAGE_SIZE - 1];
/// let mut stream: &[u8] = b"OggS";
///
/// let result = ogg_demux::decode_with_buffer(&mut stream, &mut std::io::sink(), &mut buf);
/// assert!(matches!(result, Err(PageError::BufferTooSmall { .. })));
///
/// // Nothing was read
/// assert_eq!(stream, b"OggS");
/// ```
pub fn decode_with_buffer<R, W>(reader: &mut R, writer: &mut W, buf: &mut [u8]) -> Result<()>
where
	R: Read,
	W: Write,
{
	Decoder::default()
		.decode_with_buffer(reader, writer, buf)
		.map(|_| ())
}

#[cfg(test)]
mod tests {
	use super::{DecodeSummary, Decoder};
	use crate::{DecodeOptions, PageError, ParsingMode};

	fn page(version: u8, segment_table: &[u8]) -> Vec<u8> {
		let mut bytes: Vec<u8> = Vec::new();
		bytes.extend(b"OggS");
		bytes.push(version);
		bytes.extend([0; 21]);
		bytes.push(segment_table.len() as u8);
		bytes.extend(segment_table);

		let payload_len: usize = segment_table.iter().map(|&b| usize::from(b)).sum();
		bytes.resize(bytes.len() + payload_len, 0xAA);
		bytes
	}

	#[test_log::test]
	fn summary() {
		let mut stream = page(0, &[255, 45, 7]);
		stream.extend(page(0, &[255]));
		stream.extend(page(0, &[255, 0]));

		let mut out: Vec<u8> = Vec::new();
		let summary = Decoder::default()
			.decode(&mut stream.as_slice(), &mut out)
			.unwrap();

		assert_eq!(
			summary,
			DecodeSummary {
				pages: 3,
				packets: 3,
				writes: 4,
				bytes: 817,
				invalid_versions: 0,
			}
		);
		assert_eq!(out.len(), 817);
	}

	#[test_log::test]
	fn version_parsing_modes() {
		let stream = page(1, &[3]);

		let strict = Decoder::new(DecodeOptions::new().parsing_mode(ParsingMode::Strict));
		let err = strict
			.decode(&mut stream.as_slice(), &mut std::io::sink())
			.unwrap_err();
		assert!(matches!(err, PageError::InvalidVersion(1)));

		for mode in [ParsingMode::BestAttempt, ParsingMode::Relaxed] {
			let decoder = Decoder::new(DecodeOptions::new().parsing_mode(mode));

			let mut out: Vec<u8> = Vec::new();
			decoder.decode(&mut stream.as_slice(), &mut out).unwrap();
			assert_eq!(out, [0xAA; 3]);
		}
	}

	#[test_log::test]
	fn invalid_versions_are_counted() {
		let mut stream = page(3, &[1]);
		stream.extend(page(0, &[1]));
		stream.extend(page(3, &[1]));
		stream.extend(page(7, &[1]));

		let best_attempt = Decoder::default()
			.decode(&mut stream.as_slice(), &mut std::io::sink())
			.unwrap();
		assert_eq!(best_attempt.pages, 4);
		assert_eq!(best_attempt.invalid_versions, 3);

		let relaxed = Decoder::new(DecodeOptions::new().parsing_mode(ParsingMode::Relaxed))
			.decode(&mut stream.as_slice(), &mut std::io::sink())
			.unwrap();
		assert_eq!(relaxed.pages, 4);
		assert_eq!(relaxed.invalid_versions, 0);
	}

	#[test_log::test]
	fn buffered_matches_unbuffered() {
		let mut stream = page(0, &[255, 255, 255, 100]);
		stream.extend(page(0, &[1, 2, 3]));

		let mut unbuffered: Vec<u8> = Vec::new();
		let mut buffered: Vec<u8> = Vec::new();

		let decoder = Decoder::new(DecodeOptions::new().read_ahead_capacity(64));
		let a = decoder
			.decode(&mut stream.as_slice(), &mut unbuffered)
			.unwrap();
		let b = decoder
			.decode_buffered(&mut stream.as_slice(), &mut buffered)
			.unwrap();

		assert_eq!(a, b);
		assert_eq!(unbuffered, buffered);
	}
}
