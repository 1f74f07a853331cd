//! Logging-Makros
//!
//! Mit Feature `defmt` werden die defmt-Makros durchgereicht.
//! Ohne Feature (Host-Build, Tests) sind alle Makros No-Ops.

#![allow(unused_macros, unused_imports)]

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, info, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}

// Heißt intern anders: `warn` kollidiert beim Re-Export mit dem eingebauten `#[warn]` Attribut
#[cfg(not(feature = "defmt"))]
macro_rules! warning {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use {debug, info, warning as warn};
