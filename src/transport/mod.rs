//! Audio hardware transports.
//!
//! A [`Transport`] is the pull side of the bridge: the hardware
//! (or something pretending to be it) calls [`TransportAdapter::on_pull`]
//! on its own clock.

mod constants;
pub use constants::MAX_STREAMS;

mod transport;
pub use transport::{Transport,StreamHandle};

mod adapter;
pub use adapter::{TransportAdapter,Pull};
pub(crate) use adapter::Wakeup;

mod dummy;
pub use dummy::{DummyTransport,DummyMonitor};

#[cfg(feature = "cpal")]
mod cpal;
#[cfg(feature = "cpal")]
pub use self::cpal::CpalTransport;

// Use `cpal` if it is enabled,
// tests always use the dummy.
cfg_if::cfg_if! {
	if #[cfg(all(feature = "cpal", not(test)))] {
		/// The transport used by default.
		pub type DefaultTransport = CpalTransport;
		/// The name of [`DefaultTransport`].
		pub const TRANSPORT_BACKEND: &str = "cpal";
	} else {
		/// The transport used by default.
		pub type DefaultTransport = DummyTransport;
		/// The name of [`DefaultTransport`].
		pub const TRANSPORT_BACKEND: &str = "dummy";
	}
}
