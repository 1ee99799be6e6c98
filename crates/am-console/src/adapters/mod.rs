pub mod console;
pub mod wizards;

pub use console::{format_view, parse_command, ConsoleIo};
pub use wizards::{ConsoleLocalDeviceAdd, ConsoleRecoverySetup, ConsoleRegistrationWatcher};
