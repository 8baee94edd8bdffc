// Controller events share the `anchored_list` target. Without the `tracing` feature they expand to
// nothing and their arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! anchor_event {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "anchored_list", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! anchor_event {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! atrace {
    ($($tt:tt)*) => { anchor_event!(trace, $($tt)*) };
}

macro_rules! adebug {
    ($($tt:tt)*) => { anchor_event!(debug, $($tt)*) };
}

macro_rules! awarn {
    ($($tt:tt)*) => { anchor_event!(warn, $($tt)*) };
}
