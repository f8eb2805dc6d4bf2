//! Logging infrastructure: console subscriber and the summary-collecting
//! [`Logger`].

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{UnitOutcome, UnitStatus};
