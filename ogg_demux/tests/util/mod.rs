#![allow(dead_code)]

use std::io::{Read, Write};

use ogg_demux::MAX_SEGMENT_SIZE;

pub const STREAM_SERIAL: u32 = 1_759_377_061;

/// Build a single page, the payload is taken as is
pub fn page(sequence_number: u32, segment_table: &[u8], payload: &[u8]) -> Vec<u8> {
	assert_eq!(
		segment_table.iter().map(|&b| usize::from(b)).sum::<usize>(),
		payload.len()
	);

	let mut bytes: Vec<u8> = Vec::new();
	bytes.extend(b"OggS");
	bytes.push(0);
	bytes.push(0);
	bytes.extend(u64::from(sequence_number).to_le_bytes());
	bytes.extend(STREAM_SERIAL.to_le_bytes());
	bytes.extend(sequence_number.to_le_bytes());
	bytes.extend(0_u32.to_le_bytes());
	bytes.push(segment_table.len() as u8);
	bytes.extend(segment_table);
	bytes.extend(payload);
	bytes
}

/// The lacing values for a packet of `len` bytes
///
/// A packet that is a multiple of 255 bytes gets a trailing 0.
pub fn lacing_values(len: usize) -> Vec<u8> {
	let mut lacing = vec![255; len / MAX_SEGMENT_SIZE];
	lacing.push((len % MAX_SEGMENT_SIZE) as u8);
	lacing
}

/// Deterministic packet content
pub fn packet(len: usize, seed: u8) -> Vec<u8> {
	(0..len)
		.map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
		.collect()
}

pub struct Paginated {
	pub stream: Vec<u8>,
	pub pages: usize,
	/// The number of (packet, page) pairs, which is the number of writes a decode should make
	pub contributions: usize,
}

/// Lace `packets` into pages holding at most `max_segments` segments each
pub fn paginate(packets: &[Vec<u8>], max_segments: usize) -> Paginated {
	assert!((1..=255).contains(&max_segments));

	let mut paginated = Paginated {
		stream: Vec::new(),
		pages: 0,
		contributions: 0,
	};

	let mut segment_table: Vec<u8> = Vec::new();
	let mut content: Vec<u8> = Vec::new();
	for packet in packets {
		let mut on_page = false;
		let mut offset = 0;
		for lacing_value in lacing_values(packet.len()) {
			if !on_page {
				paginated.contributions += 1;
				on_page = true;
			}

			let len = usize::from(lacing_value);
			segment_table.push(lacing_value);
			content.extend(&packet[offset..offset + len]);
			offset += len;

			if segment_table.len() == max_segments {
				flush_page(&mut paginated, &mut segment_table, &mut content);
				on_page = false;
			}
		}
	}

	if !segment_table.is_empty() {
		flush_page(&mut paginated, &mut segment_table, &mut content);
	}

	paginated
}

fn flush_page(paginated: &mut Paginated, segment_table: &mut Vec<u8>, content: &mut Vec<u8>) {
	paginated
		.stream
		.extend(page(paginated.pages as u32, segment_table, content));
	paginated.pages += 1;
	segment_table.clear();
	content.clear();
}

/// A writer that records every call to `write`
#[derive(Default)]
pub struct Writes(pub Vec<Vec<u8>>);

impl Writes {
	pub fn concat(&self) -> Vec<u8> {
		self.0.concat()
	}
}

impl Write for Writes {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.push(buf.to_vec());
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

/// A reader that counts the calls made to it, handing out at most 4096 bytes each
pub struct CountingReader<'a> {
	pub data: &'a [u8],
	pub reads: usize,
}

impl<'a> CountingReader<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, reads: 0 }
	}
}

impl Read for CountingReader<'_> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.reads += 1;

		let len = buf.len().min(self.data.len()).min(4096);
		buf[..len].copy_from_slice(&self.data[..len]);
		self.data = &self.data[len..];
		Ok(len)
	}
}
