//! Format negotiation.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	error::UnsupportedFormat,
	format::{AudioFormat,CapabilityTable,SampleEncoding},
	macros::debug2,
};

//---------------------------------------------------------------------------------------------------- Negotiate
/// Pick the [`AudioFormat`] a transport will actually play `requested` with.
///
/// The requested encoding is tried first, then [`SampleEncoding::PREFERENCE`]
/// in order. The first encoding in `capabilities` that can carry the
/// requested channel layout wins.
///
/// The channel layout and frame rate of `requested` are kept, except:
/// - fixed/ranged-rate transports override the rate (this is not an error)
/// - mono is widened to stereo for stereo-only linear encodings
///
/// This is deterministic, the same inputs always produce the same output.
///
/// # Errors
/// If no encoding is acceptable, or `requested.frame_rate` is `0`.
///
/// ```rust
/// # use pullbridge::format::*;
/// let table = CapabilityTable::EMPTY
///     .with(SampleEncoding::Pcm8, Capability::ANY)
///     .with(SampleEncoding::Adpcm4, Capability::ANY);
///
/// let requested = AudioFormat::new(SampleEncoding::Pcm16, Channels::Stereo, 44_100);
/// let negotiated = negotiate(requested, &table).unwrap();
///
/// assert_eq!(negotiated, AudioFormat::new(SampleEncoding::Pcm8, Channels::Stereo, 44_100));
/// ```
pub fn negotiate(
	requested: AudioFormat,
	capabilities: &CapabilityTable,
) -> Result<AudioFormat, UnsupportedFormat> {
	if requested.frame_rate == 0 {
		return Err(UnsupportedFormat { requested });
	}

	let candidates = std::iter::once(requested.encoding).chain(
		SampleEncoding::PREFERENCE
			.into_iter()
			.filter(|e| *e != requested.encoding)
	);

	for encoding in candidates {
		let Some(capability) = capabilities.get(encoding) else {
			continue;
		};

		let Some(channels) = capability.channels.resolve(requested.channels, encoding) else {
			debug2!("negotiate - {encoding} cannot carry {}, skipping", requested.channels);
			continue;
		};

		let frame_rate = capability.rate.resolve(requested.frame_rate);
		if frame_rate == 0 {
			continue;
		}

		let negotiated = AudioFormat { encoding, channels, frame_rate };
		debug2!("negotiate - requested: {requested}, negotiated: {negotiated}");
		return Ok(negotiated);
	}

	Err(UnsupportedFormat { requested })
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::format::{Capability,Channels,ChannelSupport,RateSupport};
	use pretty_assertions::assert_eq;

	const STEREO_44: AudioFormat = AudioFormat::new(SampleEncoding::Pcm16, Channels::Stereo, 44_100);

	#[test]
	fn requested_encoding_wins() {
		let requested = AudioFormat::new(SampleEncoding::Adpcm4, Channels::Mono, 22_050);
		assert_eq!(negotiate(requested, &CapabilityTable::ALL), Ok(requested));
	}

	#[test]
	fn walks_preference_order() {
		let table = CapabilityTable::EMPTY
			.with(SampleEncoding::Pcm8, Capability::ANY)
			.with(SampleEncoding::Adpcm4, Capability::ANY);

		let negotiated = negotiate(STEREO_44, &table).unwrap();
		assert_eq!(negotiated, AudioFormat::new(SampleEncoding::Pcm8, Channels::Stereo, 44_100));

		// Requesting the lowest fidelity still prefers it.
		let requested = AudioFormat { encoding: SampleEncoding::Adpcm4, ..STEREO_44 };
		assert_eq!(negotiate(requested, &table).unwrap().encoding, SampleEncoding::Adpcm4);

		// But falls back to the highest fidelity when absent.
		let requested = AudioFormat { encoding: SampleEncoding::Adpcm4, ..STEREO_44 };
		assert_eq!(negotiate(requested, &CapabilityTable::PCM).unwrap().encoding, SampleEncoding::Pcm16);
	}

	#[test]
	fn fixed_rate_coerces() {
		let table = CapabilityTable::EMPTY.with(SampleEncoding::Pcm16, Capability {
			channels: ChannelSupport::Both,
			rate: RateSupport::Fixed(48_000),
		});
		assert_eq!(negotiate(STEREO_44, &table).unwrap().frame_rate, 48_000);
	}

	#[test]
	fn mono_widened_for_stereo_only() {
		let stereo_only = Capability { channels: ChannelSupport::Stereo, rate: RateSupport::Any };
		let table = CapabilityTable::EMPTY
			.with(SampleEncoding::Adpcm4, stereo_only)
			.with(SampleEncoding::Pcm8, stereo_only);

		// ADPCM can't be duplicated per-sample, so 8-bit PCM is picked.
		let requested = AudioFormat::new(SampleEncoding::Adpcm4, Channels::Mono, 22_050);
		assert_eq!(
			negotiate(requested, &table),
			Ok(AudioFormat::new(SampleEncoding::Pcm8, Channels::Stereo, 22_050)),
		);
	}

	#[test]
	fn stereo_never_folded() {
		let mono_only = Capability { channels: ChannelSupport::Mono, rate: RateSupport::Any };
		let table = CapabilityTable::EMPTY.with(SampleEncoding::Pcm16, mono_only);
		assert_eq!(negotiate(STEREO_44, &table), Err(UnsupportedFormat { requested: STEREO_44 }));
	}

	#[test]
	fn nothing_acceptable() {
		assert_eq!(
			negotiate(STEREO_44, &CapabilityTable::EMPTY),
			Err(UnsupportedFormat { requested: STEREO_44 }),
		);

		let zero_rate = AudioFormat { frame_rate: 0, ..STEREO_44 };
		assert!(negotiate(zero_rate, &CapabilityTable::ALL).is_err());
	}

	#[test]
	fn deterministic() {
		let table = CapabilityTable::EMPTY.with(SampleEncoding::Adpcm4, Capability::ANY);
		let first = negotiate(STEREO_44, &table);
		for _ in 0..16 {
			assert_eq!(negotiate(STEREO_44, &table), first);
		}
	}
}
