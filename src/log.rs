//! Crate-internal logging front.
//!
//! With the `tracing` feature these are `tracing`'s own macros. Without it
//! they swallow their arguments, so call sites need no `cfg` of their own and
//! the disabled build carries no logging code at all.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

// Path imports of the exported macros; a bare `use {warn}` collides with the
// built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
