//! What a transport accepts.

//---------------------------------------------------------------------------------------------------- Use
use crate::format::{Channels,SampleEncoding};
use strum::EnumCount;

//---------------------------------------------------------------------------------------------------- ChannelSupport
/// Channel layouts a transport accepts for an encoding.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelSupport {
	/// Mono only.
	Mono,
	/// Stereo only.
	Stereo,
	/// Mono and stereo.
	Both,
}

impl ChannelSupport {
	/// Pick the layout to output `requested` with.
	///
	/// Mono is duplicated into stereo when only stereo is
	/// accepted and the encoding is linear. Stereo is never
	/// folded down.
	pub(crate) const fn resolve(self, requested: Channels, encoding: SampleEncoding) -> Option<Channels> {
		match (self, requested) {
			(Self::Both, c) => Some(c),
			(Self::Mono, Channels::Mono) => Some(Channels::Mono),
			(Self::Stereo, Channels::Stereo) => Some(Channels::Stereo),
			(Self::Stereo, Channels::Mono) if encoding.is_linear() => Some(Channels::Stereo),
			_ => None,
		}
	}
}

//---------------------------------------------------------------------------------------------------- RateSupport
/// Frame rates a transport accepts for an encoding.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateSupport {
	/// Any non-zero rate.
	Any,
	/// The hardware runs at exactly this rate.
	///
	/// Requests for other rates are silently coerced to it.
	Fixed(u32),
	/// Any rate in `min..=max`, requests are clamped into it.
	Range {
		/// Lowest accepted rate.
		min: u32,
		/// Highest accepted rate.
		max: u32,
	},
}

impl RateSupport {
	/// The rate the transport will actually run at.
	pub(crate) fn resolve(self, requested: u32) -> u32 {
		match self {
			Self::Any => requested,
			Self::Fixed(rate) => rate,
			Self::Range { min, max } => requested.clamp(min, max.max(min)),
		}
	}
}

//---------------------------------------------------------------------------------------------------- Capability
/// How a transport accepts a single [`SampleEncoding`].
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capability {
	/// Accepted channel layouts.
	pub channels: ChannelSupport,
	/// Accepted frame rates.
	pub rate: RateSupport,
}

impl Capability {
	/// Mono and stereo, at any rate.
	pub const ANY: Self = Self {
		channels: ChannelSupport::Both,
		rate: RateSupport::Any,
	};
}

//---------------------------------------------------------------------------------------------------- CapabilityTable
/// Every [`SampleEncoding`] a transport accepts, and how.
///
/// ```rust
/// # use pullbridge::format::*;
/// let table = CapabilityTable::EMPTY
///     .with(SampleEncoding::Pcm8, Capability::ANY)
///     .with(SampleEncoding::Adpcm4, Capability::ANY);
///
/// assert!(table.supports(SampleEncoding::Pcm8));
/// assert!(!table.supports(SampleEncoding::Pcm16));
/// ```
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityTable([Option<Capability>; SampleEncoding::COUNT]);

impl CapabilityTable {
	/// Accepts nothing.
	pub const EMPTY: Self = Self([None; SampleEncoding::COUNT]);

	/// Linear 16-bit and 8-bit PCM, any layout, any rate.
	pub const PCM: Self = Self::EMPTY
		.with(SampleEncoding::Pcm16, Capability::ANY)
		.with(SampleEncoding::Pcm8, Capability::ANY);

	/// Every encoding, any layout, any rate.
	pub const ALL: Self = Self([Some(Capability::ANY); SampleEncoding::COUNT]);

	#[inline]
	#[must_use]
	/// Accept `encoding` as described by `capability`.
	pub const fn with(mut self, encoding: SampleEncoding, capability: Capability) -> Self {
		self.0[encoding.index()] = Some(capability);
		self
	}

	#[inline]
	#[must_use]
	/// Stop accepting `encoding`.
	pub const fn without(mut self, encoding: SampleEncoding) -> Self {
		self.0[encoding.index()] = None;
		self
	}

	#[inline]
	#[must_use]
	/// How `encoding` is accepted, if at all.
	pub const fn get(&self, encoding: SampleEncoding) -> Option<Capability> {
		self.0[encoding.index()]
	}

	#[inline]
	#[must_use]
	/// Is `encoding` accepted at all?
	pub const fn supports(&self, encoding: SampleEncoding) -> bool {
		self.get(encoding).is_some()
	}

	#[must_use]
	/// Accepts nothing?
	pub fn is_empty(&self) -> bool {
		self.0.iter().all(Option::is_none)
	}
}

impl Default for CapabilityTable {
	fn default() -> Self {
		Self::PCM
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn channel_resolve() {
		use ChannelSupport as S;
		use SampleEncoding as E;
		use Channels::{Mono,Stereo};

		assert_eq!(S::Both.resolve(Mono, E::Adpcm4), Some(Mono));
		assert_eq!(S::Mono.resolve(Stereo, E::Pcm16), None);
		assert_eq!(S::Stereo.resolve(Mono, E::Pcm8), Some(Stereo));
		assert_eq!(S::Stereo.resolve(Mono, E::Adpcm4), None);
	}

	#[test]
	fn rate_resolve() {
		assert_eq!(RateSupport::Any.resolve(11_025), 11_025);
		assert_eq!(RateSupport::Fixed(44_100).resolve(22_050), 44_100);
		assert_eq!(RateSupport::Range { min: 8_000, max: 48_000 }.resolve(96_000), 48_000);
		assert_eq!(RateSupport::Range { min: 8_000, max: 48_000 }.resolve(4_000), 8_000);
	}

	#[test]
	fn table() {
		assert!(CapabilityTable::EMPTY.is_empty());
		assert!(!CapabilityTable::PCM.supports(SampleEncoding::Adpcm4));
		assert!(CapabilityTable::ALL.without(SampleEncoding::Pcm16).supports(SampleEncoding::Pcm8));
		assert!(!CapabilityTable::ALL.without(SampleEncoding::Pcm16).supports(SampleEncoding::Pcm16));
	}
}
