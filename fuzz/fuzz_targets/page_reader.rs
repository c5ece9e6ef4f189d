#![no_main]

use libfuzzer_sys::fuzz_target;
use ogg_demux::{MAX_PAGE_SIZE, PageReader};

fuzz_target!(|data: &[u8]| {
	let mut reader = data;
	let mut buf = vec![0; MAX_PAGE_SIZE];
	let Ok(mut pages) = PageReader::new(&mut reader, &mut buf) else {
		return;
	};

	while let Ok(Some(page)) = pages.next_page() {
		let table_len: usize = page.segment_table().iter().map(|&b| usize::from(b)).sum();
		assert_eq!(table_len, page.payload().len());
	}
});
