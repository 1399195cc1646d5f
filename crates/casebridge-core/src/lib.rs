pub mod attachment;
pub mod case;
pub mod config;
pub mod error;
pub mod fogbugz;
pub mod product;
pub mod record;
pub mod remote;
pub mod resolver;
pub mod sanitize;
pub mod status;
pub mod sync;
pub mod types;

pub use error::{Result, SyncError};
