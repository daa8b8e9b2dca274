//! Client for the remote generation API (`{base}/{model}:generateContent`)

mod core;
pub use self::core::*;
