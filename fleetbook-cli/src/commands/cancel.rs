//! Cancel command implementation.

use clap::Args;
use fleetbook::{OutputFormat, ReservationId};

use crate::error::CliError;
use crate::output::print_record;
use crate::utils::{load_configuration, open_engine, require_actor, GlobalOptions};

/// Cancel a reservation.
///
/// Cancelling twice is not an error; the second run prints the already
/// cancelled reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = require_actor(global)?;
        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let reservation = engine.cancel(ReservationId::new(self.id), &actor)?;

        print_record(
            &reservation,
            self.format.unwrap_or_else(|| config.output_format()),
        )
    }
}
