//! Delete command implementation.

use clap::Args;
use fleetbook::ReservationId;

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, require_privileged, GlobalOptions};

/// Permanently delete a reservation.
///
/// Unlike `cancel`, the row is removed. The car's availability is recomputed
/// in the same transaction.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_privileged(global, "delete")?;
        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let removed = engine.delete_reservation(ReservationId::new(self.id))?;

        if !global.quiet {
            println!(
                "Deleted reservation {} ({} to {} on resource {})",
                removed.id(),
                removed.start_date(),
                removed.end_date(),
                removed.resource_id()
            );
        }
        Ok(())
    }
}
