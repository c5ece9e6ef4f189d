use crate::MAX_SEGMENT_SIZE;
use crate::error::{PageError, PageSection, Result};

use std::io::Write;

/// What [`write_packets`] did with a single page
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct PageSummary {
	/// The number of packets that ended on this page
	pub packets: usize,
	/// The number of writes issued, one per contiguous run of packet data
	pub writes: usize,
	/// The number of payload bytes written
	pub bytes: usize,
	/// Whether the page's last packet continues onto the next page
	pub continues: bool,
}

/// Write every packet (or part of a packet) in a page to `writer`
///
/// Each packet is written with a single call. A packet that started on an earlier page
/// only has its remaining bytes written, and a packet that continues onto the next page
/// has the bytes on this page written now. Concatenating the writes reproduces the packet
/// data in stream order, there is no marker between packets.
///
/// A zero-length packet (or the zero-length tail of a packet that ended exactly at a page
/// boundary) still results in a call to [`Write::write`] with an empty buffer.
///
/// # Errors
///
/// * `payload` is shorter than the sum of `segment_table` ([`PageError::Truncated`])
/// * `writer` fails ([`PageError::SinkWrite`])
///
/// # Examples
///
/// ```rust
/// use ogg_demux::write_packets;
///
/// # fn main() -> ogg_demux::Result<()> {
/// // Two packets, the second one continuing onto the next page
/// let segment_table = [3, 255];
/// let payload = [1; 258];
///
/// let mut out: Vec<u8> = Vec::new();
/// let summary = write_packets(&mut out, &segment_table, &payload)?;
///
/// assert_eq!(summary.packets, 1);
/// assert!(summary.continues);
/// assert_eq!(out.len(), 258);
/// # Ok(()) }
/// ```
pub fn write_packets<W>(
	writer: &mut W,
	segment_table: &[u8],
	payload: &[u8],
) -> Result<PageSummary>
where
	W: Write,
{
	let mut summary = PageSummary::default();

	let mut start = 0;
	let mut end = 0;
	let mut segments = segment_table.iter().copied().peekable();
	while segments.peek().is_some() {
		// Consume up to and including the first segment that isn't full
		let mut terminated = false;
		for segment in segments.by_ref() {
			end += usize::from(segment);

			if usize::from(segment) < MAX_SEGMENT_SIZE {
				terminated = true;
				break;
			}
		}

		let Some(chunk) = payload.get(start..end) else {
			return Err(PageError::Truncated {
				section: PageSection::Payload,
				expected: end,
				read: payload.len(),
			});
		};

		log::trace!(
			"Writing {} bytes ({})",
			chunk.len(),
			if terminated { "packet end" } else { "continued" }
		);
		emit(writer, chunk).map_err(PageError::SinkWrite)?;

		summary.writes += 1;
		summary.bytes += chunk.len();
		if terminated {
			summary.packets += 1;
		} else {
			summary.continues = true;
		}

		start = end;
	}

	if summary.continues {
		log::debug!("Packet continues onto the next page");
	}

	Ok(summary)
}

fn emit<W>(writer: &mut W, chunk: &[u8]) -> std::io::Result<()>
where
	W: Write,
{
	if chunk.is_empty() {
		// `write_all` never reaches the writer for an empty slice
		return writer.write(chunk).map(|_| ());
	}

	writer.write_all(chunk)
}
