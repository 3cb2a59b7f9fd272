//! Show command implementation.

use clap::Args;
use fleetbook::{Error, OutputFormat, ReservationId};

use crate::error::CliError;
use crate::output::print_record;
use crate::utils::{load_configuration, open_engine, require_actor, GlobalOptions};

/// Show a single reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// Non-privileged actors can only see their own reservations.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = require_actor(global)?;
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let id = ReservationId::new(self.id);
        let reservation = engine.get(id)?;
        if !actor.can_access(&reservation) {
            return Err(Error::Forbidden {
                reservation_id: id,
                actor: actor.id,
            }
            .into());
        }

        print_record(
            &reservation,
            self.format.unwrap_or_else(|| config.output_format()),
        )
    }
}
