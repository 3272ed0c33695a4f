//! Quote pricing for sign fabrication services.
//!
//! The [`pricing`] module holds the calculator and its helpers; [`catalog`]
//! loads the reference rate table, [`history`] keeps recent quotes and
//! [`workflow`] covers numbering, approval and work orders. [`command`] is
//! the JSON form the binary reads.

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod history;
pub mod pricing;
pub mod workflow;

pub use catalog::Catalog;
pub use command::QuoteCommand;
pub use config::CotizadorConfig;
pub use error::{AppError, Result};
