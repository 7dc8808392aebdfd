//! Config command handlers.

use airgap_core::ServiceConfig;

use crate::error::CliError;
use crate::presentation::print_json;

/// Print the effective configuration.
pub fn show(config: &ServiceConfig) -> Result<(), CliError> {
    print_json(config)
}
