use crate::error::{PageError, PageSection, Result};
use crate::header::PageHeader;
use crate::{HEADER_SIZE, MAX_PAGE_SIZE};

use std::io::{ErrorKind, Read};

/// A single page, borrowed from a [`PageReader`]'s buffer
///
/// The view is only valid until the next call to [`PageReader::next_page`], the
/// buffer is overwritten by every page.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Page<'a> {
	header: PageHeader,
	segment_table: &'a [u8],
	payload: &'a [u8],
}

impl<'a> Page<'a> {
	/// Returns the page's header
	pub fn header(&self) -> &PageHeader {
		&self.header
	}

	/// Returns the page's segment table
	pub fn segment_table(&self) -> &'a [u8] {
		self.segment_table
	}

	/// Returns the page's content
	///
	/// The length of the content is always the sum of the segment table.
	pub fn payload(&self) -> &'a [u8] {
		self.payload
	}
}

/// Reads one page at a time into a fixed scratch buffer
///
/// The buffer is split into the header, segment table, and payload regions of the page
/// currently being read, so no allocations are made per page.
///
/// # Examples
///
/// ```rust
/// use ogg_demux::{MAX_PAGE_SIZE, PageReader};
///
/// # fn main() -> ogg_demux::Result<()> {
/// let mut stream: &[u8] = &[];
/// let mut buf = vec![0; MAX_PAGE_SIZE];
///
/// let mut reader = PageReader::new(&mut stream, &mut buf)?;
/// while let Some(page) = reader.next_page()? {
/// 	println!("Page {} holds {} bytes", page.header().sequence_number, page.payload().len());
/// }
/// # Ok(()) }
/// ```
pub struct PageReader<'a, R> {
	reader: &'a mut R,
	buf: &'a mut [u8],
}

impl<'a, R> PageReader<'a, R>
where
	R: Read,
{
	/// Creates a `PageReader` over `reader`, using `buf` as scratch space
	///
	/// # Errors
	///
	/// `buf` is smaller than [`MAX_PAGE_SIZE`]. Nothing is read from `reader` in this case.
	pub fn new(reader: &'a mut R, buf: &'a mut [u8]) -> Result<Self> {
		if buf.len() < MAX_PAGE_SIZE {
			return Err(PageError::BufferTooSmall { len: buf.len() });
		}

		Ok(Self { reader, buf })
	}

	/// Reads the next page
	///
	/// This consumes exactly the header, segment table, and payload of one page from the
	/// reader, and nothing more.
	///
	/// Returns `None` if the reader was exhausted exactly at a page boundary.
	///
	/// # Errors
	///
	/// * The reader ends partway through a page ([`PageError::Truncated`])
	/// * See [`PageHeader::parse`]
	/// * [`std::io::Error`]
	pub fn next_page(&mut self) -> Result<Option<Page<'_>>> {
		let buf_len = self.buf.len();
		let Some((header_buf, rest)) = self.buf.split_first_chunk_mut::<HEADER_SIZE>() else {
			return Err(PageError::BufferTooSmall { len: buf_len });
		};

		let read = read_full(&mut *self.reader, &mut header_buf[..])?;
		if read == 0 {
			return Ok(None);
		}

		check_complete(PageSection::Header, HEADER_SIZE, read)?;

		let header = PageHeader::parse(header_buf)?;

		let segment_count = usize::from(header.segments);
		let (segment_table, rest) = rest.split_at_mut(segment_count);

		let read = read_full(&mut *self.reader, segment_table)?;
		check_complete(PageSection::SegmentTable, segment_count, read)?;

		let payload_len = segment_table.iter().map(|&b| usize::from(b)).sum::<usize>();
		let (payload, _) = rest.split_at_mut(payload_len);

		let read = read_full(&mut *self.reader, payload)?;
		check_complete(PageSection::Payload, payload_len, read)?;

		log::trace!(
			"Read page {} (granule position: {}, serial: {}, segments: {segment_count}, \
			 payload: {payload_len} bytes)",
			header.sequence_number,
			header.abgp,
			header.stream_serial,
		);

		Ok(Some(Page {
			header,
			segment_table,
			payload,
		}))
	}
}

fn check_complete(section: PageSection, expected: usize, read: usize) -> Result<()> {
	if read < expected {
		log::debug!("Stream truncated in the {section}, {read}/{expected} bytes available");
		return Err(PageError::Truncated {
			section,
			expected,
			read,
		});
	}

	Ok(())
}

// Same as `Read::read_exact`, but reports how far it got instead of failing on EOF
fn read_full<R>(reader: &mut R, buf: &mut [u8]) -> Result<usize>
where
	R: Read,
{
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(e) if e.kind() == ErrorKind::Interrupted => {},
			Err(e) => return Err(e.into()),
		}
	}

	Ok(filled)
}
