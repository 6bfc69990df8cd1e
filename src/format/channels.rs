//! Channel layouts.

//---------------------------------------------------------------------------------------------------- Use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- Channels
/// Channel layout of an [`AudioFormat`](crate::format::AudioFormat).
///
/// Stereo samples are interleaved, left first.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Channels {
	/// 1 channel.
	Mono = 1,
	/// 2 channels.
	Stereo = 2,
}

impl Channels {
	#[inline]
	#[must_use]
	/// Amount of channels.
	///
	/// ```rust
	/// # use pullbridge::format::*;
	/// assert_eq!(Channels::Mono.count(), 1);
	/// assert_eq!(Channels::Stereo.count(), 2);
	/// ```
	pub const fn count(self) -> usize {
		self as usize
	}

	#[inline]
	#[must_use]
	/// `true` if [`Channels::Stereo`].
	pub const fn is_stereo(self) -> bool {
		matches!(self, Self::Stereo)
	}
}

impl TryFrom<u8> for Channels {
	type Error = u8;

	/// Only `1` and `2` are valid, the input is returned otherwise.
	fn try_from(count: u8) -> Result<Self, u8> {
		match count {
			1 => Ok(Self::Mono),
			2 => Ok(Self::Stereo),
			_ => Err(count),
		}
	}
}
