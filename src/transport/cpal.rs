//! `cpal` audio hardware.
//!
//! `cpal` pulls `f32` samples from its own thread, so each
//! of its callbacks drains whole [`TransportAdapter`] buffers
//! into a staging buffer and decodes from there.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::Gain,
	error::TransportError,
	format::{Capability,CapabilityTable,ChannelSupport,RateSupport,SampleEncoding},
	macros::{debug2,warn2},
	transport::{Transport,TransportAdapter,StreamHandle},
	transport::constants::MAX_STREAMS,
};
use cpal::traits::{DeviceTrait,HostTrait,StreamTrait};
use crossbeam::channel::Receiver;
use std::{borrow::Cow,sync::Arc};

//---------------------------------------------------------------------------------------------------- CpalTransport
/// A [`Transport`] playing to the default `cpal` output device.
///
/// Plays [`SampleEncoding::Pcm16`] and [`SampleEncoding::Pcm8`]
/// at the device's default sample rate, in whichever of mono and
/// stereo the device accepts `f32` samples in at that rate.
pub struct CpalTransport {
	device: cpal::Device,
	capabilities: CapabilityTable,
	next_id: u32,
	streams: Vec<CpalStream>,
}

struct CpalStream {
	handle: StreamHandle,
	buffer_bytes: usize,
	adapter: Option<Arc<TransportAdapter>>,
	gain: Gain,
	/// `Some` while started.
	stream: Option<cpal::Stream>,
	errors: Option<Receiver<cpal::StreamError>>,
}

impl CpalTransport {
	#[cold]
	#[inline(never)]
	/// Connect to the default output device.
	///
	/// # Errors
	/// If there is no output device, its configs can't be read,
	/// or it plays neither mono nor stereo `f32` at its default rate.
	pub fn new() -> Result<Self, TransportError> {
		let host = cpal::default_host();

		let Some(device) = host.default_output_device() else {
			return Err(TransportError::DeviceUnavailable);
		};

		let config = device.default_output_config()?;
		debug2!("CpalTransport - device config:\n{config:#?}");

		let rate = config.sample_rate().0;
		let ranges = device
			.supported_output_configs()?
			.filter(|c| c.sample_format() == cpal::SampleFormat::F32)
			.map(|c| (c.channels(), c.min_sample_rate().0, c.max_sample_rate().0));

		let Some(channels) = channel_support(ranges, rate) else {
			return Err(TransportError::InvalidFormat);
		};
		debug2!("CpalTransport - {rate}Hz, channels: {channels:?}");

		let capability = Capability {
			channels,
			rate: RateSupport::Fixed(rate),
		};

		let capabilities = CapabilityTable::EMPTY
			.with(SampleEncoding::Pcm16, capability)
			.with(SampleEncoding::Pcm8, capability);

		Ok(Self {
			device,
			capabilities,
			next_id: 0,
			streams: Vec::with_capacity(MAX_STREAMS),
		})
	}

	fn stream(&mut self, handle: StreamHandle) -> Option<&mut CpalStream> {
		self.streams.iter_mut().find(|s| s.handle == handle)
	}

	fn halt(stream: &mut CpalStream) {
		// Dropping the `cpal::Stream` joins its callback thread.
		if let Some(s) = stream.stream.take() {
			if let Err(e) = s.pause() {
				warn2!("CpalTransport - stream {} pause error: {e}", stream.handle);
			}
			drop(s);
		}

		if let Some(errors) = stream.errors.take() {
			for e in errors.try_iter() {
				warn2!("CpalTransport - stream {} error: {e}", stream.handle);
			}
		}
	}
}

impl std::fmt::Debug for CpalTransport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CpalTransport")
			.field("capabilities", &self.capabilities)
			.field("streams", &self.streams.len())
			.finish_non_exhaustive()
	}
}

//---------------------------------------------------------------------------------------------------- Channels
/// Which of mono/stereo the `(channels, min_rate, max_rate)` ranges accept at `rate`.
fn channel_support<I>(ranges: I, rate: u32) -> Option<ChannelSupport>
where
	I: IntoIterator<Item = (u16, u32, u32)>,
{
	let mut mono = false;
	let mut stereo = false;

	for (channels, min, max) in ranges {
		if !(min..=max).contains(&rate) {
			continue;
		}
		match channels {
			1 => mono = true,
			2 => stereo = true,
			_ => (),
		}
	}

	match (mono, stereo) {
		(true, true) => Some(ChannelSupport::Both),
		(true, false) => Some(ChannelSupport::Mono),
		(false, true) => Some(ChannelSupport::Stereo),
		(false, false) => None,
	}
}

//---------------------------------------------------------------------------------------------------- Decode
/// Bytes per sample, `None` for encodings we can't play.
const fn sample_width(encoding: SampleEncoding) -> Option<usize> {
	match encoding {
		SampleEncoding::Pcm16 => Some(2),
		SampleEncoding::Pcm8 => Some(1),
		SampleEncoding::Adpcm4 => None,
	}
}

/// `bytes` is exactly 1 sample.
#[inline]
fn decode(bytes: &[u8], encoding: SampleEncoding) -> f32 {
	match encoding {
		SampleEncoding::Pcm16 => f32::from(i16::from_le_bytes([bytes[0], bytes[1]])) / 32768.0,
		#[allow(clippy::cast_possible_wrap)]
		_ => f32::from(bytes[0] as i8) / 128.0,
	}
}

//---------------------------------------------------------------------------------------------------- Transport Impl
impl Transport for CpalTransport {
	fn capabilities(&self) -> CapabilityTable {
		self.capabilities
	}

	fn create_stream(&mut self, buffer_bytes: usize) -> Result<StreamHandle, TransportError> {
		if self.streams.len() >= MAX_STREAMS {
			return Err(TransportError::HandlesExhausted);
		}
		if buffer_bytes == 0 {
			return Err(TransportError::InvalidFormat);
		}

		let handle = StreamHandle::new(self.next_id);
		self.next_id = self.next_id.wrapping_add(1);

		self.streams.push(CpalStream {
			handle,
			buffer_bytes,
			adapter: None,
			gain: Gain::DEFAULT,
			stream: None,
			errors: None,
		});

		Ok(handle)
	}

	fn register_callback(
		&mut self,
		handle: StreamHandle,
		adapter: Arc<TransportAdapter>,
	) -> Result<(), TransportError> {
		if sample_width(adapter.format().encoding).is_none() {
			return Err(TransportError::InvalidFormat);
		}

		let stream = self.stream(handle).ok_or(TransportError::InvalidHandle)?;
		stream.adapter = Some(adapter);
		Ok(())
	}

	fn set_gain(&mut self, handle: StreamHandle, gain: Gain) {
		// Takes effect on the next `start()`.
		if let Some(stream) = self.stream(handle) {
			stream.gain = gain;
		}
	}

	fn start(&mut self, handle: StreamHandle, frame_rate: u32, stereo: bool) -> Result<(), TransportError> {
		let device = self.device.clone();

		let stream = self.stream(handle).ok_or(TransportError::InvalidHandle)?;
		if stream.stream.is_some() {
			return Ok(());
		}

		let Some(adapter) = stream.adapter.as_ref().map(Arc::clone) else {
			return Err(TransportError::Unknown(Cow::Borrowed("no callback registered")));
		};

		let encoding = adapter.format().encoding;
		let width = sample_width(encoding).ok_or(TransportError::InvalidFormat)?;

		let config = cpal::StreamConfig {
			channels: if stereo { 2 } else { 1 },
			sample_rate: cpal::SampleRate(frame_rate),
			buffer_size: cpal::BufferSize::Default,
		};
		debug2!("CpalTransport - stream {handle} config:\n{config:#?}");

		let gain = stream.gain.as_f32();
		let buffer_bytes = stream.buffer_bytes;

		// Allocated once here, never in the callback.
		let mut staging = vec![0_u8; buffer_bytes];
		let mut filled = 0;
		let mut cursor = 0;

		let data_callback = move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
			for sample in output.iter_mut() {
				if cursor + width > filled {
					let pull = adapter.on_pull(buffer_bytes);
					staging[..pull.len()].copy_from_slice(&pull);
					filled = pull.len();
					cursor = 0;
				}

				if cursor + width > filled {
					*sample = 0.0;
					continue;
				}

				*sample = decode(&staging[cursor..cursor + width], encoding) * gain;
				cursor += width;
			}
		};

		let (error_send, error_recv) = crossbeam::channel::bounded(16);
		let error_callback = move |error: cpal::StreamError| {
			drop(error_send.try_send(error));
		};

		let s = device.build_output_stream(&config, data_callback, error_callback, None)?;
		s.play()?;

		stream.stream = Some(s);
		stream.errors = Some(error_recv);
		debug2!("CpalTransport - started stream {handle}");
		Ok(())
	}

	fn stop(&mut self, handle: StreamHandle) {
		if let Some(stream) = self.stream(handle) {
			Self::halt(stream);
		}
	}

	fn destroy(&mut self, handle: StreamHandle) {
		let Some(index) = self.streams.iter().position(|s| s.handle == handle) else {
			return;
		};

		let mut stream = self.streams.swap_remove(index);
		Self::halt(&mut stream);
		debug2!("CpalTransport - destroyed stream {handle}");
	}
}

//---------------------------------------------------------------------------------------------------- Error re-map
impl From<cpal::DefaultStreamConfigError> for TransportError {
	fn from(error: cpal::DefaultStreamConfigError) -> Self {
		use cpal::DefaultStreamConfigError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::StreamTypeNotSupported => Self::InvalidFormat,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::SupportedStreamConfigsError> for TransportError {
	fn from(error: cpal::SupportedStreamConfigsError) -> Self {
		use cpal::SupportedStreamConfigsError as E;
		match error {
			E::DeviceNotAvailable | E::InvalidArgument => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::StreamError> for TransportError {
	fn from(error: cpal::StreamError) -> Self {
		use cpal::StreamError as E;
		match error {
			E::DeviceNotAvailable => Self::StreamClosed,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::BuildStreamError> for TransportError {
	fn from(error: cpal::BuildStreamError) -> Self {
		use cpal::BuildStreamError as E;
		match error {
			E::DeviceNotAvailable | E::InvalidArgument | E::StreamIdOverflow => Self::DeviceUnavailable,
			E::StreamConfigNotSupported => Self::InvalidFormat,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::PlayStreamError> for TransportError {
	fn from(error: cpal::PlayStreamError) -> Self {
		use cpal::PlayStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}
