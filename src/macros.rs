//----------------------------------------------------------------------------------------------------
// Global macros for internal pullbridge usage.

//---------------------------------------------------------------------------------------------------- Logging
// Logs with `log` but only if the log feature is enabled.
//
// Consumer context (`TransportAdapter::on_pull()`)
// must only ever use `trace2!()`.

macro_rules! error2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::error!($($arg)+);
    }};
}
pub(crate) use error2;

macro_rules! warn2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
    }};
}
pub(crate) use warn2;

macro_rules! info2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);
    }};
}
pub(crate) use info2;

macro_rules! debug2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
    }};
}
pub(crate) use debug2;

macro_rules! trace2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
    }};
}
pub(crate) use trace2;

//---------------------------------------------------------------------------------------------------- Contract
// Lifecycle misuse is a programmer error, fail fast.
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        assert!($cond, "pullbridge contract violation: {}", format_args!($($arg)+))
    };
}
pub(crate) use contract;
