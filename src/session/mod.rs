//! The playback session: lifecycle and producer side operations.

mod session;
pub use session::{Session,PlaybackState};
use session::{Opened,opened};

mod wait;
use wait::Waiter;

mod priority;
use priority::Promotion;

mod open;
mod close;
mod functions;

#[cfg(test)]
mod test;
