pub mod config;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod io;
pub mod media;
pub mod options;
pub mod paths;
pub mod record;
pub mod share;
pub mod step;
pub mod storage;
pub mod store;
pub mod types;
pub mod wizard;

pub use error::{BriefingError, Result};
