//! Fleet management commands.
//!
//! Reading the fleet is open to everyone. Changing it requires
//! `--privileged`.

use clap::{Args, Subcommand, ValueEnum};
use fleetbook::{
    NewResource, OutputFormat, PageRequest, ResourceFilter, ResourceId, ResourceUpdate,
};
use rust_decimal::Decimal;

use crate::error::CliError;
use crate::output::{print_page, print_record};
use crate::utils::{load_configuration, open_engine, require_privileged, GlobalOptions};

/// Fleet management subcommands.
#[derive(Subcommand)]
pub enum ResourceCommand {
    /// Add a car to the fleet
    Add(AddResource),

    /// Change a car's details or daily rate
    Update(UpdateResource),

    /// Remove a car and all its reservations
    Remove(RemoveResource),

    /// Show a car
    Show(ShowResource),

    /// List the fleet
    List(ListResources),

    /// Force the availability flag
    SetAvailability(SetAvailability),
}

impl ResourceCommand {
    /// Execute the selected subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Self::Add(cmd) => cmd.execute(global),
            Self::Update(cmd) => cmd.execute(global),
            Self::Remove(cmd) => cmd.execute(global),
            Self::Show(cmd) => cmd.execute(global),
            Self::List(cmd) => cmd.execute(global),
            Self::SetAvailability(cmd) => cmd.execute(global),
        }
    }
}

/// Add a car to the fleet.
#[derive(Args)]
pub struct AddResource {
    /// Manufacturer
    #[arg(long)]
    pub brand: String,

    /// Model name
    #[arg(long)]
    pub model: String,

    /// Daily rate
    #[arg(long, value_name = "AMOUNT")]
    pub price: Decimal,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl AddResource {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_privileged(global, "resource add")?;
        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let resource = engine.create_resource(
            &NewResource::new(self.brand, self.model, self.price).with_description(self.description),
        )?;

        print_record(&resource, self.format.unwrap_or_else(|| config.output_format()))
    }
}

/// Change a car's details or daily rate.
///
/// Existing reservations keep the price they were booked at.
#[derive(Args)]
pub struct UpdateResource {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New manufacturer
    #[arg(long)]
    pub brand: Option<String>,

    /// New model name
    #[arg(long)]
    pub model: Option<String>,

    /// New daily rate
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Decimal>,

    /// New description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl UpdateResource {
    fn update(&self) -> ResourceUpdate {
        let description = if self.clear_description {
            Some(None)
        } else {
            self.description.clone().map(Some)
        };

        ResourceUpdate {
            brand: self.brand.clone(),
            model: self.model.clone(),
            description,
            price_per_day: self.price,
        }
    }

    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_privileged(global, "resource update")?;

        let update = self.update();
        if update.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to update (pass --brand, --model, --price or --description)".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;
        let resource = engine.update_resource(ResourceId::new(self.id), &update)?;

        print_record(&resource, self.format.unwrap_or_else(|| config.output_format()))
    }
}

/// Remove a car and all its reservations.
#[derive(Args)]
pub struct RemoveResource {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl RemoveResource {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_privileged(global, "resource remove")?;
        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let removed = engine.delete_resource(ResourceId::new(self.id))?;

        if !global.quiet {
            println!(
                "Removed resource {} ({} {})",
                removed.id(),
                removed.brand(),
                removed.model()
            );
        }
        Ok(())
    }
}

/// Show a car.
#[derive(Args)]
pub struct ShowResource {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ShowResource {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let resource = engine.get_resource(ResourceId::new(self.id))?;

        print_record(&resource, self.format.unwrap_or_else(|| config.output_format()))
    }
}

/// List the fleet, newest first.
#[derive(Args)]
pub struct ListResources {
    /// Case-insensitive model substring
    #[arg(long, short = 'q', value_name = "TEXT")]
    pub query: Option<String>,

    /// Only cars whose availability flag matches
    #[arg(long, value_name = "BOOL")]
    pub available: Option<bool>,

    /// Lowest daily rate (used together with --max-price)
    #[arg(long, value_name = "AMOUNT", requires = "max_price")]
    pub min_price: Option<Decimal>,

    /// Highest daily rate (used together with --min-price)
    #[arg(long, value_name = "AMOUNT", requires = "min_price")]
    pub max_price: Option<Decimal>,

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

impl ListResources {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let filter = ResourceFilter {
            query: self.query,
            available: self.available,
            min_price: self.min_price,
            max_price: self.max_price,
        };
        let page = PageRequest::from_options(Some(self.page), self.page_size, config.page_size());
        let result = engine.list_resources(&filter, page)?;

        print_page(&result, self.format.unwrap_or_else(|| config.output_format()))
    }
}

/// Target state for `set-availability`.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Availability {
    /// Open the car for booking
    Available,
    /// Withdraw the car from booking
    Unavailable,
}

/// Force the availability flag.
///
/// Booking, cancelling and deleting reservations recompute the flag, which
/// replaces a value forced here.
#[derive(Args)]
pub struct SetAvailability {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New state
    #[arg(value_enum)]
    pub state: Availability,
}

impl SetAvailability {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_privileged(global, "resource set-availability")?;
        let config = load_configuration(global)?;
        let mut engine = open_engine(global, &config)?;

        let available = matches!(self.state, Availability::Available);
        let resource = engine.set_availability_override(ResourceId::new(self.id), available)?;

        if !global.quiet {
            println!(
                "Resource {} is now {}",
                resource.id(),
                if resource.available() {
                    "available"
                } else {
                    "unavailable"
                }
            );
        }
        Ok(())
    }
}
