//! Audio format.

//---------------------------------------------------------------------------------------------------- Use
use crate::format::{Channels,SampleEncoding};
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- AudioFormat
/// A complete description of how audio bytes are laid out.
///
/// This is both what the caller asks for in
/// [`Session::open`](crate::Session::open) and what
/// negotiation returns. Once negotiated, it never changes.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioFormat {
	/// Per-sample encoding.
	pub encoding: SampleEncoding,
	/// Channel layout.
	pub channels: Channels,
	/// Frames per second.
	pub frame_rate: u32,
}

impl AudioFormat {
	/// 16-bit stereo at 44.1kHz.
	///
	/// ```rust
	/// # use pullbridge::format::*;
	/// assert_eq!(AudioFormat::DEFAULT.encoding, SampleEncoding::Pcm16);
	/// assert_eq!(AudioFormat::DEFAULT.channels, Channels::Stereo);
	/// assert_eq!(AudioFormat::DEFAULT.frame_rate, 44_100);
	/// ```
	pub const DEFAULT: Self = Self::new(SampleEncoding::Pcm16, Channels::Stereo, 44_100);

	#[inline]
	#[must_use]
	/// Create a new [`AudioFormat`].
	pub const fn new(encoding: SampleEncoding, channels: Channels, frame_rate: u32) -> Self {
		Self { encoding, channels, frame_rate }
	}

	#[inline]
	#[must_use]
	/// Same format, different channel layout.
	pub const fn with_channels(self, channels: Channels) -> Self {
		Self { channels, ..self }
	}

	#[inline]
	#[must_use]
	/// Bits one frame (a sample for each channel) occupies.
	pub const fn bits_per_frame(&self) -> usize {
		self.encoding.bits_per_sample() * self.channels.count()
	}

	#[must_use]
	/// How many bytes `frames` frames occupy.
	///
	/// Rounds up for encodings with sub-byte frames.
	///
	/// `None` on overflow.
	///
	/// ```rust
	/// # use pullbridge::format::*;
	/// let f = AudioFormat::DEFAULT;
	/// assert_eq!(f.buffer_bytes(1024), Some(4096));
	///
	/// let f = AudioFormat::new(SampleEncoding::Adpcm4, Channels::Mono, 22_050);
	/// assert_eq!(f.buffer_bytes(3), Some(2));
	/// assert_eq!(f.buffer_bytes(usize::MAX), None);
	/// ```
	pub fn buffer_bytes(&self, frames: usize) -> Option<usize> {
		let bits = frames.checked_mul(self.bits_per_frame())?;
		Some(bits / 8 + usize::from(bits % 8 != 0))
	}

	#[must_use]
	/// Nominal playback time of `frames` frames.
	///
	/// A `0` frame rate returns [`Duration::ZERO`].
	pub fn duration_of(&self, frames: usize) -> Duration {
		if self.frame_rate == 0 {
			return Duration::ZERO;
		}

		let nanos = (frames as u128 * 1_000_000_000) / u128::from(self.frame_rate);
		Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
	}
}

impl Default for AudioFormat {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl std::fmt::Display for AudioFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}/{}Hz", self.encoding, self.channels, self.frame_rate)
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bytes() {
		let pcm8 = AudioFormat::new(SampleEncoding::Pcm8, Channels::Mono, 8_000);
		assert_eq!(pcm8.buffer_bytes(100), Some(100));
		assert_eq!(pcm8.with_channels(Channels::Stereo).buffer_bytes(100), Some(200));

		let adpcm = AudioFormat::new(SampleEncoding::Adpcm4, Channels::Stereo, 44_100);
		assert_eq!(adpcm.bits_per_frame(), 8);
		assert_eq!(adpcm.buffer_bytes(100), Some(100));
	}

	#[test]
	fn duration() {
		let f = AudioFormat::new(SampleEncoding::Pcm16, Channels::Stereo, 48_000);
		assert_eq!(f.duration_of(48_000), Duration::from_secs(1));
		assert_eq!(f.duration_of(0), Duration::ZERO);
		assert_eq!(f.duration_of(480), Duration::from_millis(10));

		let broken = AudioFormat { frame_rate: 0, ..f };
		assert_eq!(broken.duration_of(1024), Duration::ZERO);
	}

	#[test]
	fn display() {
		assert_eq!(AudioFormat::DEFAULT.to_string(), "pcm16/stereo/44100Hz");
	}
}
