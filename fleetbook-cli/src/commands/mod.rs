//! CLI command implementations.
//!
//! - `init`: create the data directory and database
//! - `reserve`, `cancel`: book and release a car
//! - `show`, `list`: inspect reservations
//! - `delete`: remove a reservation outright (privileged)
//! - `resource`: manage the fleet
//! - `completions`: generate shell completion scripts

pub mod cancel;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod reserve;
pub mod resource;
pub mod show;

pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reserve::ReserveCommand;
pub use resource::ResourceCommand;
pub use show::ShowCommand;
