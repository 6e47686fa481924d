//! Logging shims.
//!
//! With the `tracing` feature the importer and the overlay log through
//! `tracing`; without it every call site compiles away. Format-only calls
//! still borrow their arguments so captured bindings are not reported as
//! unused.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        let _ = ::core::format_args!($fmt $(, $arg)*);
    }};
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        let _ = ::core::format_args!($fmt $(, $arg)*);
    }};
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
