pub mod config;
pub mod error;
pub mod models;
pub mod status;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use error::{NotifyError, Result};
pub use status::{CardColor, StatusDescriptor, StatusId};
