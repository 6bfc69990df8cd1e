//! The producer's back-pressure wait.
//!
//! Spin a little, then park (or sleep) in bounded quanta,
//! re-checking the condition after each one. With
//! [`WaitStrategy::Park`] the producer announces it is parked
//! and the consumer unparks it when it releases a slot.
//! The quantum is a safety net, not the wakeup.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::WaitStrategy,
	macros::{trace2,warn2},
	transport::Wakeup,
};
use crossbeam::{sync::Parker,utils::Backoff};
use std::time::{Duration,Instant};

//---------------------------------------------------------------------------------------------------- Waiter
#[derive(Debug)]
pub(super) struct Waiter {
	/// Its `Unparker` lives in the `TransportAdapter`'s [`Wakeup`].
	parker: Parker,
	strategy: WaitStrategy,
	poll_interval: Duration,
	stall_threshold: Duration,
}

impl Waiter {
	pub(super) fn new(
		parker: Parker,
		strategy: WaitStrategy,
		poll_interval: Duration,
		stall_threshold: Duration,
	) -> Self {
		Self {
			parker,
			strategy,
			poll_interval,
			stall_threshold,
		}
	}

	#[cfg(test)]
	pub(super) const fn stall_threshold(&self) -> Duration {
		self.stall_threshold
	}

	/// Block until `done()` returns `true`.
	///
	/// Returns `true` if this took longer than the stall threshold.
	/// Stalls are logged but never given up on, the hardware
	/// clock is the only thing that can end this wait.
	pub(super) fn until<F>(&self, wakeup: &Wakeup, operation: &str, mut done: F) -> bool
	where
		F: FnMut() -> bool,
	{
		let backoff = Backoff::new();
		while !backoff.is_completed() {
			if done() {
				return false;
			}
			backoff.snooze();
		}

		trace2!("Waiter - {operation}() waiting on the consumer");

		let start = Instant::now();
		let mut stalled = false;

		loop {
			if done() {
				return stalled;
			}

			match self.strategy {
				WaitStrategy::Park => {
					wakeup.set_parked(true);
					// A release between the check above and
					// raising the flag would never unpark us.
					if !done() {
						self.parker.park_timeout(self.poll_interval);
					}
					wakeup.set_parked(false);
				},
				WaitStrategy::Poll => std::thread::sleep(self.poll_interval),
			}

			if !stalled && start.elapsed() > self.stall_threshold {
				stalled = true;
				warn2!(
					"Waiter - {operation}() stalled, consumer has not pulled for {:?} (threshold: {:?})",
					start.elapsed(),
					self.stall_threshold,
				);
			}
		}
	}
}
