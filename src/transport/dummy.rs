//! Dummy audio hardware.
//!
//! This implements [`Transport`] with a thread
//! that pulls on a fixed period and then throws
//! the audio away.
//!
//! Functionally, it should behave the exact same
//! as a real backend, except it doesn't actually
//! play any audio.
//!
//! This is used for testing, and as
//! the fallback when no backend is enabled.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::Gain,
	error::TransportError,
	format::{AudioFormat,CapabilityTable,Channels},
	macros::{debug2,error2,trace2},
	transport::{Transport,TransportAdapter,StreamHandle},
	transport::constants::{MAX_STREAMS,DUMMY_THREAD_NAME},
};
use crossbeam::channel::{Receiver,Sender,RecvTimeoutError};
use std::{
	borrow::Cow,
	thread::JoinHandle,
	time::Duration,
	sync::{
		Arc,
		atomic::{AtomicU64,AtomicU8,AtomicUsize,Ordering},
	},
};

//---------------------------------------------------------------------------------------------------- DummyMonitor
/// What a [`DummyTransport`] has "played" so far.
///
/// This is cheaply [`Clone`]-able and can be
/// read while the transport is running.
#[derive(Clone,Debug,Default)]
pub struct DummyMonitor(Arc<Counters>);

#[derive(Debug,Default)]
struct Counters {
	pulls: AtomicU64,
	delivered_bytes: AtomicU64,
	underruns: AtomicU64,
	running: AtomicUsize,
	gain: AtomicU8,
}

impl DummyMonitor {
	#[must_use]
	/// Total `on_pull()` calls made by every stream.
	pub fn pulls(&self) -> u64 {
		self.0.pulls.load(Ordering::Acquire)
	}

	#[must_use]
	/// Total bytes of committed audio received.
	pub fn delivered_bytes(&self) -> u64 {
		self.0.delivered_bytes.load(Ordering::Acquire)
	}

	#[must_use]
	/// Total pulls that found nothing committed.
	pub fn underruns(&self) -> u64 {
		self.0.underruns.load(Ordering::Acquire)
	}

	#[must_use]
	/// How many pull threads are currently alive.
	pub fn running(&self) -> usize {
		self.0.running.load(Ordering::Acquire)
	}

	#[must_use]
	/// The last [`Gain`] set on any stream.
	pub fn gain(&self) -> Gain {
		Gain::new(self.0.gain.load(Ordering::Acquire))
	}
}

//---------------------------------------------------------------------------------------------------- DummyTransport
/// A [`Transport`] that plays into nothing.
///
/// Each started stream gets a thread that calls
/// [`TransportAdapter::on_pull`] for a whole buffer,
/// then sleeps for how long that buffer would have
/// taken to play (or [`DummyTransport::with_period`]).
#[derive(Debug)]
pub struct DummyTransport {
	capabilities: CapabilityTable,
	/// Fixed pull period, else derived from the buffer size.
	period: Option<Duration>,
	/// Every pulled buffer with fresh audio is sent here, if set.
	recorder: Option<Sender<Vec<u8>>>,
	next_id: u32,
	streams: Vec<DummyStream>,
	monitor: DummyMonitor,
}

#[derive(Debug)]
struct DummyStream {
	handle: StreamHandle,
	buffer_bytes: usize,
	adapter: Option<Arc<TransportAdapter>>,
	worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
	shutdown: Sender<()>,
	thread: JoinHandle<()>,
}

impl DummyTransport {
	#[cold]
	#[inline(never)]
	#[must_use]
	/// A dummy transport that supports `capabilities`.
	pub fn new(capabilities: CapabilityTable) -> Self {
		Self {
			capabilities,
			period: None,
			recorder: None,
			next_id: 0,
			streams: Vec::with_capacity(MAX_STREAMS),
			monitor: DummyMonitor::default(),
		}
	}

	#[must_use]
	/// Pull every `period` instead of at the nominal playback speed.
	pub fn with_period(mut self, period: Duration) -> Self {
		self.period = Some(period);
		self
	}

	#[must_use]
	/// Record pulled audio.
	///
	/// Every pull that delivers fresh audio sends a copy of it
	/// to the returned [`Receiver`]. Underruns are not sent.
	pub fn recording(mut self) -> (Self, Receiver<Vec<u8>>) {
		let (send, recv) = crossbeam::channel::unbounded();
		self.recorder = Some(send);
		(self, recv)
	}

	#[must_use]
	/// Counters shared with the pull threads.
	pub fn monitor(&self) -> DummyMonitor {
		self.monitor.clone()
	}

	fn stream(&mut self, handle: StreamHandle) -> Option<&mut DummyStream> {
		self.streams.iter_mut().find(|s| s.handle == handle)
	}

	/// Stop the pull thread of `stream` and wait for it to exit.
	fn join(stream: &mut DummyStream, monitor: &DummyMonitor) {
		let Some(worker) = stream.worker.take() else {
			return;
		};

		// The thread may have already exited,
		// in which case there is nothing to tell.
		drop(worker.shutdown.send(()));

		if worker.thread.join().is_err() {
			error2!("DummyTransport - stream {} pull thread panicked", stream.handle);
		}

		monitor.0.running.fetch_sub(1, Ordering::Release);
		debug2!("DummyTransport - stream {} stopped", stream.handle);
	}
}

impl Default for DummyTransport {
	fn default() -> Self {
		Self::new(CapabilityTable::default())
	}
}

//---------------------------------------------------------------------------------------------------- Transport Impl
impl Transport for DummyTransport {
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

		self.streams.push(DummyStream {
			handle,
			buffer_bytes,
			adapter: None,
			worker: None,
		});

		debug2!("DummyTransport - created stream {handle}, {buffer_bytes} bytes");
		Ok(handle)
	}

	fn register_callback(
		&mut self,
		handle: StreamHandle,
		adapter: Arc<TransportAdapter>,
	) -> Result<(), TransportError> {
		let stream = self.stream(handle).ok_or(TransportError::InvalidHandle)?;
		stream.adapter = Some(adapter);
		Ok(())
	}

	fn set_gain(&mut self, handle: StreamHandle, gain: Gain) {
		if self.stream(handle).is_some() {
			self.monitor.0.gain.store(gain.inner(), Ordering::Release);
		}
	}

	fn start(&mut self, handle: StreamHandle, frame_rate: u32, stereo: bool) -> Result<(), TransportError> {
		let period = self.period;
		let recorder = self.recorder.clone();
		let monitor = self.monitor.clone();
		let thread_monitor = monitor.clone();

		let stream = self.stream(handle).ok_or(TransportError::InvalidHandle)?;
		if stream.worker.is_some() {
			return Ok(());
		}

		let Some(adapter) = stream.adapter.as_ref().map(Arc::clone) else {
			return Err(TransportError::Unknown(Cow::Borrowed("no callback registered")));
		};

		let buffer_bytes = stream.buffer_bytes;
		let period = period.unwrap_or_else(|| {
			let channels = if stereo { Channels::Stereo } else { Channels::Mono };
			let format = AudioFormat::new(adapter.format().encoding, channels, frame_rate);
			let frames = (buffer_bytes * 8) / format.bits_per_frame();
			format.duration_of(frames)
		});

		let (shutdown, shutdown_recv) = crossbeam::channel::bounded(1);

		let thread = std::thread::Builder::new()
			.name(DUMMY_THREAD_NAME.into())
			.spawn(move || pull_loop(&adapter, buffer_bytes, period, &shutdown_recv, &thread_monitor, recorder.as_ref()))
			.map_err(|e| TransportError::Unknown(Cow::Owned(e.to_string())))?;

		monitor.0.running.fetch_add(1, Ordering::Release);
		stream.worker = Some(Worker { shutdown, thread });

		debug2!("DummyTransport - started stream {handle}, pulling every {period:?}");
		Ok(())
	}

	fn stop(&mut self, handle: StreamHandle) {
		let monitor = self.monitor.clone();
		if let Some(stream) = self.stream(handle) {
			Self::join(stream, &monitor);
		}
	}

	fn destroy(&mut self, handle: StreamHandle) {
		let Some(index) = self.streams.iter().position(|s| s.handle == handle) else {
			return;
		};

		let mut stream = self.streams.swap_remove(index);
		Self::join(&mut stream, &self.monitor);

		debug2!("DummyTransport - destroyed stream {handle}");
		// `stream.adapter` is dropped here.
	}
}

impl Drop for DummyTransport {
	fn drop(&mut self) {
		for stream in &mut self.streams {
			Self::join(stream, &self.monitor);
		}
	}
}

//---------------------------------------------------------------------------------------------------- Pull thread
/// The fake hardware clock.
fn pull_loop(
	adapter: &TransportAdapter,
	buffer_bytes: usize,
	period: Duration,
	shutdown: &Receiver<()>,
	monitor: &DummyMonitor,
	recorder: Option<&Sender<Vec<u8>>>,
) {
	loop {
		{
			let pull = adapter.on_pull(buffer_bytes);
			trace2!("DummyTransport - pulled {} bytes, delivered {}", pull.len(), pull.delivered());

			monitor.0.pulls.fetch_add(1, Ordering::Release);
			if pull.is_underrun() {
				monitor.0.underruns.fetch_add(1, Ordering::Release);
			} else {
				monitor.0.delivered_bytes.fetch_add(pull.delivered() as u64, Ordering::Release);
				if let Some(recorder) = recorder {
					drop(recorder.send(pull.to_vec()));
				}
			}
		}

		match shutdown.recv_timeout(period) {
			Err(RecvTimeoutError::Timeout) => continue,
			Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
		}
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		buffer::allocate,
		config::UnderrunPolicy,
		format::SampleEncoding,
	};
	use crossbeam::sync::Parker;
	use pretty_assertions::assert_eq;

	const FORMAT: AudioFormat = AudioFormat::new(SampleEncoding::Pcm16, Channels::Stereo, 48_000);

	fn adapter() -> Arc<TransportAdapter> {
		let parker = Parker::new();
		let buffers = allocate(&FORMAT, 16, true, 32).unwrap();
		Arc::new(TransportAdapter::new(buffers, FORMAT, UnderrunPolicy::Stale, parker.unparker().clone()))
	}

	#[test]
	fn handles_exhausted() {
		let mut t = DummyTransport::default();
		for i in 0..MAX_STREAMS {
			assert_eq!(t.create_stream(64).unwrap().get(), i as u32);
		}
		assert_eq!(t.create_stream(64), Err(TransportError::HandlesExhausted));

		t.destroy(StreamHandle::new(0));
		assert!(t.create_stream(64).is_ok());
	}

	#[test]
	fn invalid_handle() {
		let mut t = DummyTransport::default();
		let h = StreamHandle::new(123);
		assert_eq!(t.register_callback(h, adapter()), Err(TransportError::InvalidHandle));
		assert_eq!(t.start(h, 48_000, true), Err(TransportError::InvalidHandle));
		// No-ops.
		t.set_gain(h, Gain::MIN);
		t.stop(h);
		t.destroy(h);
	}

	#[test]
	fn start_without_callback() {
		let mut t = DummyTransport::default();
		let h = t.create_stream(64).unwrap();
		assert!(matches!(t.start(h, 48_000, true), Err(TransportError::Unknown(_))));
	}

	#[test]
	fn pulls_until_stopped() {
		let adapter = adapter();
		let weak = Arc::downgrade(&adapter);

		let mut t = DummyTransport::default().with_period(Duration::from_millis(1));
		let monitor = t.monitor();
		let h = t.create_stream(adapter.buffer_bytes()).unwrap();
		t.register_callback(h, adapter).unwrap();
		t.set_gain(h, Gain::PERCENT_50);
		assert_eq!(monitor.gain(), Gain::PERCENT_50);

		t.start(h, 48_000, true).unwrap();
		// Starting twice is fine.
		t.start(h, 48_000, true).unwrap();
		assert_eq!(monitor.running(), 1);

		while monitor.pulls() < 3 {
			std::thread::yield_now();
		}

		t.stop(h);
		assert_eq!(monitor.running(), 0);
		let pulls = monitor.pulls();
		std::thread::sleep(Duration::from_millis(10));
		assert_eq!(monitor.pulls(), pulls);
		// Nothing was ever committed.
		assert_eq!(monitor.underruns(), pulls);
		assert_eq!(monitor.delivered_bytes(), 0);

		// The adapter is only dropped on destroy.
		assert!(weak.upgrade().is_some());
		t.destroy(h);
		assert!(weak.upgrade().is_none());
	}

	#[test]
	fn drop_joins() {
		let adapter = adapter();
		let weak = Arc::downgrade(&adapter);

		let mut t = DummyTransport::default().with_period(Duration::from_millis(1));
		let monitor = t.monitor();
		let h = t.create_stream(adapter.buffer_bytes()).unwrap();
		t.register_callback(h, adapter).unwrap();
		t.start(h, 48_000, true).unwrap();

		drop(t);
		assert_eq!(monitor.running(), 0);
		assert!(weak.upgrade().is_none());
	}
}
