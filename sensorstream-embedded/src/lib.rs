#![no_std]

#[cfg(test)]
extern crate std;

pub mod error;
pub mod sensor;

pub use error::*;
pub use sensor::*;
