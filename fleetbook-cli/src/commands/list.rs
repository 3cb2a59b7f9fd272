//! List command implementation.
//!
//! Lists reservations newest first, one page at a time, as a table, JSON or
//! CSV.

use clap::Args;
use fleetbook::{
    OutputFormat, PageRequest, RequesterId, ReservationFilter, ReservationStatus, ResourceId,
};

use crate::error::CliError;
use crate::output::print_page;
use crate::utils::{load_configuration, open_engine, require_actor, GlobalOptions};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations for this resource
    #[arg(long, value_name = "ID")]
    pub resource: Option<i64>,

    /// Only reservations of this requester (privileged actors only; others
    /// always see their own)
    #[arg(long, value_name = "ID")]
    pub requester: Option<i64>,

    /// Only reservations with this status (confirmed, cancelled)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Page size (1-100)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = require_actor(global)?;
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let mut filter = ReservationFilter::default();
        if let Some(id) = self.resource {
            filter = filter.for_resource(ResourceId::new(id));
        }
        if let Some(id) = self.requester {
            filter = filter.for_requester(RequesterId::new(id));
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        let filter = filter.scoped_to(&actor);

        let page = PageRequest::from_options(Some(self.page), self.page_size, config.page_size());
        let result = engine.list(&filter, page)?;

        print_page(&result, self.format.unwrap_or_else(|| config.output_format()))
    }
}
