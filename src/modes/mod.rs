pub mod human;
pub mod signals;

pub use human::HumanMode;
pub use signals::{Shutdown, ShutdownSignals};
