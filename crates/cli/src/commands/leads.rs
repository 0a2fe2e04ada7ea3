//! Lead inspection commands.

use lead_intake_core::LeadId;
use lead_intake_server::db::PgLeadStore;

use super::{CommandError, connect};

/// Print one lead as pretty JSON.
///
/// # Errors
///
/// Returns `CommandError::LeadNotFound` if no row has this id.
pub async fn show(id: i32) -> Result<(), CommandError> {
    let pool = connect().await?;
    let store = PgLeadStore::new(pool.clone());

    let lead = store
        .find_by_id(LeadId::new(id))
        .await?
        .ok_or(CommandError::LeadNotFound(id))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&lead)?);
    }

    pool.close().await;
    Ok(())
}
