//! Output gain.

//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::transport::Transport;

//---------------------------------------------------------------------------------------------------- Gain
/// Output gain handed to the [`Transport`].
///
/// This is a wrapper around [`u8`], where `0` is silence
/// and `255` plays samples as-is, the same scale the
/// hardware stream volume register uses.
///
/// This unit is linear, not logarithmic.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Gain(u8);

/// Generates `Gain::PERCENT_N` constants.
macro_rules! impl_const {
	($num:tt) => {
		paste::paste! {
			#[doc = "Returns [`Gain`] at `" $num "`% of [`Gain::MAX`]"]
			pub const [<PERCENT_ $num>]: Self = Self::from_percent_u8($num);
		}
	}
}

impl Gain {
	/// ```rust
	/// # use pullbridge::config::*;
	/// assert_eq!(Gain::MAX.inner(), 255);
	/// ```
	pub const MAX: Self = Self(u8::MAX);
	/// ```rust
	/// # use pullbridge::config::*;
	/// assert_eq!(Gain::MIN.inner(), 0);
	/// ```
	pub const MIN: Self = Self(0);
	/// ```rust
	/// # use pullbridge::config::*;
	/// assert_eq!(Gain::DEFAULT, Gain::MAX);
	/// ```
	pub const DEFAULT: Self = Self::MAX;

	#[inline]
	#[must_use]
	/// Create a new [`Gain`].
	pub const fn new(gain: u8) -> Self {
		Self(gain)
	}

	#[must_use]
	/// Create a [`Gain`] from a linear `0.0..=1.0` [`f32`].
	///
	/// # Saturating
	/// - Greater than `1.0` and [`f32::INFINITY`] return [`Gain::MAX`]
	/// - Negatives, [`f32::NAN`] and [`f32::NEG_INFINITY`] return [`Gain::MIN`]
	///
	/// ```rust
	/// # use pullbridge::config::*;
	/// assert_eq!(Gain::from_f32(1.0),  Gain::MAX);
	/// assert_eq!(Gain::from_f32(0.5).inner(), 128);
	/// assert_eq!(Gain::from_f32(2.0),  Gain::MAX);
	/// assert_eq!(Gain::from_f32(-1.0), Gain::MIN);
	/// assert_eq!(Gain::from_f32(f32::NAN), Gain::MIN);
	/// assert_eq!(Gain::from_f32(f32::INFINITY), Gain::MAX);
	/// ```
	pub fn from_f32(gain: f32) -> Self {
		use std::num::FpCategory as F;
		match gain.classify() {
			F::Normal => {
				if gain >= 1.0 {
					Self::MAX
				} else if gain.is_sign_negative() {
					Self::MIN
				} else {
					#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
					Self((gain * 255.0).round() as u8)
				}
			},
			F::Infinite => {
				if gain.is_sign_positive() {
					Self::MAX
				} else {
					Self::MIN
				}
			},
			F::Zero | F::Nan | F::Subnormal => Self::MIN,
		}
	}

	#[inline]
	#[must_use]
	/// Returns the inner [`u8`].
	pub const fn inner(&self) -> u8 {
		self.0
	}

	#[inline]
	#[must_use]
	/// Returns the gain as a linear `0.0..=1.0` multiplier.
	pub fn as_f32(&self) -> f32 {
		f32::from(self.0) / 255.0
	}

	/// Percent (saturating at `100`) to [`Gain`], rounded to nearest.
	const fn from_percent_u8(percent: u8) -> Self {
		let percent = if percent > 100 { 100 } else { percent as u16 };
		Self(((percent * 255 + 50) / 100) as u8)
	}

	seq_macro::seq!(N in 0..=100 {
		impl_const!(N);
	});
}

impl Default for Gain {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl std::fmt::Display for Gain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u8> for Gain {
	#[inline]
	fn from(gain: u8) -> Self {
		Self(gain)
	}
}

impl From<f32> for Gain {
	#[inline]
	fn from(gain: f32) -> Self {
		Self::from_f32(gain)
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn percent_constants() {
		assert_eq!(Gain::PERCENT_0, Gain::MIN);
		assert_eq!(Gain::PERCENT_100, Gain::MAX);
		assert_eq!(Gain::PERCENT_50.inner(), 128);
		assert_eq!(Gain::PERCENT_25.inner(), 64);
	}

	#[test]
	fn percent_monotonic() {
		let mut last = Gain::MIN;
		for p in 0..=100 {
			let gain = Gain::from_percent_u8(p);
			assert!(gain >= last);
			last = gain;
		}
		assert_eq!(Gain::from_percent_u8(200), Gain::MAX);
	}

	#[test]
	fn f32_round_trip() {
		for g in 0..=u8::MAX {
			assert_eq!(Gain::from_f32(Gain::new(g).as_f32()), Gain::new(g));
		}
	}
}
