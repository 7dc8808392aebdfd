//! Concrete port implementations for airgap.
//!
//! - [`SimulatedLocalEngine`] stands in for the on-premise model runtime
//! - [`EnvCredentialProbe`] inspects the process environment for hosted
//!   provider credentials

#![deny(unsafe_code)]

pub mod ports_impl;

pub use ports_impl::{EnvCredentialProbe, SimulatedLocalEngine, SimulatedTimings};

#[cfg(test)]
use tokio_test as _;
