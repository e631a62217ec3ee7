#[cfg(feature = "tracing")]
macro_rules! sgadebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "scrollgrid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sgadebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! sgawarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "scrollgrid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sgawarn {
    ($($tt:tt)*) => {};
}
