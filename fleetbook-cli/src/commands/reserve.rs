//! Reserve command implementation.

use chrono::NaiveDate;
use clap::Args;
use fleetbook::{OutputFormat, RequesterId, ReserveOptions, ResourceId};

use crate::error::CliError;
use crate::output::print_record;
use crate::utils::{load_configuration, open_engine, require_actor, GlobalOptions};

/// Book a car for a date range.
#[derive(Args)]
pub struct ReserveCommand {
    /// Resource (car) id to book
    #[arg(long, short = 'r', value_name = "ID")]
    pub resource: i64,

    /// First day of the booking (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: NaiveDate,

    /// Return day, not charged (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: NaiveDate,

    /// Book on behalf of another requester (privileged)
    #[arg(long = "for", value_name = "ID")]
    pub on_behalf_of: Option<i64>,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = require_actor(global)?;

        let requester = match self.on_behalf_of {
            Some(id) if !actor.privileged => {
                return Err(CliError::PermissionDenied(format!(
                    "booking for requester {id} requires --privileged"
                )));
            }
            Some(id) => RequesterId::new(id),
            None => actor.id,
        };

        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let options = ReserveOptions::new(
            ResourceId::new(self.resource),
            requester,
            self.start,
            self.end,
        );
        let reservation = engine.reserve(&options)?;

        if !global.quiet {
            eprintln!(
                "Reserved resource {} for {} night(s)",
                reservation.resource_id(),
                reservation.dates().nights()
            );
        }
        print_record(
            &reservation,
            self.format.unwrap_or_else(|| config.output_format()),
        )
    }
}
