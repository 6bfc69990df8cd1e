//! Mono to stereo duplication.

//---------------------------------------------------------------------------------------------------- Use
use crate::format::SampleEncoding;

//---------------------------------------------------------------------------------------------------- Upmix
/// Duplicate the mono samples at the start of `buf` into interleaved stereo, in place.
///
/// `buf` must be exactly twice the size of the mono data.
/// Samples are moved back to front so nothing is
/// overwritten before it is read.
///
/// Only linear encodings can be duplicated.
pub(crate) fn mono_to_stereo(buf: &mut [u8], encoding: SampleEncoding) {
	debug_assert!(encoding.is_linear());
	debug_assert_eq!(buf.len() % 2, 0);

	let width = encoding.bits_per_sample() / 8;
	let samples = buf.len() / (width * 2);

	for i in (0..samples).rev() {
		let src = i * width;
		let dst = i * width * 2;
		buf.copy_within(src..src + width, dst);
		buf.copy_within(dst..dst + width, dst + width);
	}
}
