//! Sample encodings.

//---------------------------------------------------------------------------------------------------- Use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- SampleEncoding
/// How a single sample is laid out in a buffer.
///
/// PCM encodings are signed and little-endian,
/// so an all-zero buffer is silence for every variant.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum SampleEncoding {
	/// Signed 16-bit linear PCM.
	Pcm16,
	/// Signed 8-bit linear PCM.
	Pcm8,
	/// 4-bit companded ADPCM (two samples per byte).
	Adpcm4,
}

impl SampleEncoding {
	/// Fallback order used during negotiation, most fidelity first.
	///
	/// ```rust
	/// # use pullbridge::format::*;
	/// assert_eq!(
	///     SampleEncoding::PREFERENCE,
	///     [SampleEncoding::Pcm16, SampleEncoding::Pcm8, SampleEncoding::Adpcm4],
	/// );
	/// ```
	pub const PREFERENCE: [Self; Self::COUNT] = [Self::Pcm16, Self::Pcm8, Self::Adpcm4];

	#[inline]
	#[must_use]
	/// Bits a single sample of one channel occupies.
	pub const fn bits_per_sample(self) -> usize {
		match self {
			Self::Pcm16  => 16,
			Self::Pcm8   => 8,
			Self::Adpcm4 => 4,
		}
	}

	#[inline]
	#[must_use]
	/// Is this a linear PCM encoding?
	///
	/// Only linear encodings can have samples copied
	/// around individually (e.g. mono to stereo duplication).
	pub const fn is_linear(self) -> bool {
		matches!(self, Self::Pcm16 | Self::Pcm8)
	}

	/// Index into per-encoding tables.
	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}
