pub mod clock;
pub mod config;
pub mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CaptionVariant, ChartcastConfig, PrivacyLevel};
pub use error::ChartcastError;
