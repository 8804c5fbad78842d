mod error;
pub use error::{ChallengeError, Result};

pub mod benchmarks;

#[cfg(feature = "c001")]
pub mod travelling_salesman;
#[cfg(feature = "c001")]
pub use travelling_salesman as c001;
