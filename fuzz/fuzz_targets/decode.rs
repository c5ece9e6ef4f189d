#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let mut reader = data;
	let _ = ogg_demux::decode(&mut reader, &mut std::io::sink());
});
