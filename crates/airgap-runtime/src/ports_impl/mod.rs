//! Port implementations for airgap-runtime.
//!
//! These connect the abstract ports defined in airgap-core to the host:
//! timers for the simulated model runtime and the process environment for
//! the credential audit.

pub mod credential_probe;
pub mod local_engine;

pub use credential_probe::EnvCredentialProbe;
pub use local_engine::{SimulatedLocalEngine, SimulatedTimings};
