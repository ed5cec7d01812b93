//! Special-purpose modules used throughout the Light implementation.

mod identity;

pub use identity::*;
