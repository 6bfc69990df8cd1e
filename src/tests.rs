//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::{Config,Gain},
	error::TransportError,
	format::{AudioFormat,CapabilityTable,Channels,SampleEncoding},
	session::Session,
	transport::{Transport,TransportAdapter,StreamHandle},
};
use std::sync::{Arc,Mutex,MutexGuard};

//---------------------------------------------------------------------------------------------------- Event
/// Every call a [`ManualTransport`] received, in order.
#[derive(Clone,Debug,PartialEq,Eq)]
pub(crate) enum Event {
	Create(usize),
	Register(StreamHandle),
	SetGain(StreamHandle, Gain),
	Start(StreamHandle, u32, bool),
	Stop(StreamHandle),
	Destroy(StreamHandle),
}

//---------------------------------------------------------------------------------------------------- ManualTransport
#[derive(Debug,Default)]
struct Inner {
	events: Vec<Event>,
	/// Registered and not yet destroyed.
	adapters: Vec<(StreamHandle, Arc<TransportAdapter>)>,
	/// Created and not yet destroyed.
	live: Vec<StreamHandle>,
	next_id: u32,
}

/// A [`Transport`] that never pulls by itself.
///
/// The test is the hardware: pulls are simulated with [`Probe::pull`].
#[derive(Debug)]
pub(crate) struct ManualTransport {
	capabilities: CapabilityTable,
	pub(crate) fail_create: Option<TransportError>,
	pub(crate) fail_register: Option<TransportError>,
	pub(crate) fail_start: Option<TransportError>,
	inner: Arc<Mutex<Inner>>,
}

/// The test's side of a [`ManualTransport`].
#[derive(Clone,Debug)]
pub(crate) struct Probe(Arc<Mutex<Inner>>);

impl ManualTransport {
	pub(crate) fn new(capabilities: CapabilityTable) -> (Self, Probe) {
		let inner = Arc::new(Mutex::new(Inner::default()));
		let this = Self {
			capabilities,
			fail_create: None,
			fail_register: None,
			fail_start: None,
			inner: Arc::clone(&inner),
		};
		(this, Probe(inner))
	}

	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().unwrap()
	}
}

impl Probe {
	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.0.lock().unwrap()
	}

	pub(crate) fn events(&self) -> Vec<Event> {
		self.lock().events.clone()
	}

	/// Streams created and not destroyed.
	pub(crate) fn live_streams(&self) -> usize {
		self.lock().live.len()
	}

	/// Adapters the transport still holds.
	pub(crate) fn registered(&self) -> usize {
		self.lock().adapters.len()
	}

	/// Pull like the hardware would, from the most recently registered stream.
	///
	/// Returns a copy of the pulled bytes and the delivered count,
	/// `None` if no stream is registered.
	pub(crate) fn pull(&self, requested: usize) -> Option<(Vec<u8>, usize)> {
		let inner = self.lock();
		let (_, adapter) = inner.adapters.last()?;
		let pull = adapter.on_pull(requested);
		Some((pull.to_vec(), pull.delivered()))
	}
}

impl Transport for ManualTransport {
	fn capabilities(&self) -> CapabilityTable {
		self.capabilities
	}

	fn create_stream(&mut self, buffer_bytes: usize) -> Result<StreamHandle, TransportError> {
		if let Some(e) = self.fail_create.clone() {
			return Err(e);
		}
		let mut inner = self.lock();
		let handle = StreamHandle::new(inner.next_id);
		inner.next_id += 1;
		inner.live.push(handle);
		inner.events.push(Event::Create(buffer_bytes));
		Ok(handle)
	}

	fn register_callback(&mut self, handle: StreamHandle, adapter: Arc<TransportAdapter>) -> Result<(), TransportError> {
		if let Some(e) = self.fail_register.clone() {
			return Err(e);
		}
		let mut inner = self.lock();
		inner.events.push(Event::Register(handle));
		inner.adapters.push((handle, adapter));
		Ok(())
	}

	fn set_gain(&mut self, handle: StreamHandle, gain: Gain) {
		self.lock().events.push(Event::SetGain(handle, gain));
	}

	fn start(&mut self, handle: StreamHandle, frame_rate: u32, stereo: bool) -> Result<(), TransportError> {
		if let Some(e) = self.fail_start.clone() {
			return Err(e);
		}
		self.lock().events.push(Event::Start(handle, frame_rate, stereo));
		Ok(())
	}

	fn stop(&mut self, handle: StreamHandle) {
		self.lock().events.push(Event::Stop(handle));
	}

	fn destroy(&mut self, handle: StreamHandle) {
		let mut inner = self.lock();
		inner.events.push(Event::Destroy(handle));
		inner.adapters.retain(|(h, _)| *h != handle);
		inner.live.retain(|h| *h != handle);
	}
}

//---------------------------------------------------------------------------------------------------- Test Init Helpers
/// 16 frames of 8-bit mono (16 bytes per buffer).
pub(crate) const SMALL: AudioFormat = AudioFormat::new(SampleEncoding::Pcm8, Channels::Mono, 8_000);

/// A small test [`Config`].
pub(crate) fn config(double_buffered: bool) -> Config {
	Config {
		double_buffered,
		frame_count: 16,
		..Config::DEFAULT
	}
}

/// A [`Session`] on a [`ManualTransport`] supporting [`CapabilityTable::PCM`].
pub(crate) fn manual_session(config: Config) -> (Session<ManualTransport>, Probe) {
	let (transport, probe) = ManualTransport::new(CapabilityTable::PCM);
	(Session::new(transport, config), probe)
}
