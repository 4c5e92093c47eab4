use crate::client::TransferApi;
use anyhow::Result;
use tracing::info;

/// Submits a flush and reports the acknowledgement; completion of the flush
/// itself is not awaited.
pub fn run_flush<A: TransferApi>(api: &A) -> Result<()> {
    let status = api.send_to_vault_flush()?;
    info!(message=%status.message, "flush acknowledged");
    eprintln!("Flush job submitted: {}", status.message);
    Ok(())
}
