pub mod intake_service;
pub mod notifier;

pub use intake_service::{IntakeError, IntakeService};
pub use notifier::{Notifier, NotifierError};
