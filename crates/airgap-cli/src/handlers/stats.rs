//! Stats command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_json;

/// Initialize the service and print its statistics snapshot as JSON.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let service = ctx.ready().await?;
    print_json(&service.statistics())
}
