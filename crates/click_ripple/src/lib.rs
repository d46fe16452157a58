#![forbid(unsafe_code)]

mod ripple;

pub use ripple::*;
