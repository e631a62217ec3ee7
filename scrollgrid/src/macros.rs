#[cfg(feature = "tracing")]
macro_rules! sgtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "scrollgrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sgtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! sgdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "scrollgrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sgdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! sgwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "scrollgrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sgwarn {
    ($($tt:tt)*) => {};
}
