//! Configuration read once by [`Session::open`].
//!
//! Nothing here has any effect on an already opened session.

#[allow(unused_imports)] // docs
use crate::Session;

mod config;
pub use config::Config;

mod gain;
pub use gain::Gain;

mod policy;
pub use policy::{UnderrunPolicy,WaitStrategy};

mod constants;
pub use constants::{
	DEFAULT_ALIGNMENT,
	DEFAULT_FRAME_COUNT,
	DEFAULT_POLL_INTERVAL,
};
pub(crate) use constants::STALL_FACTOR;
