//! Client plumbing shared by the NSX tools: credentials, errors and the
//! manager REST client.

pub mod client;
pub mod config;
pub mod error;

pub use client::{NsxClient, ReclaimApi, TraceflowApi};
pub use config::{Connection, ConnectionArgs};
pub use error::{ApiError, ConfigError};
