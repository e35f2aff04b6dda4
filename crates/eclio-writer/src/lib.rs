//! Eclipse binary output writer.
//!
//! An [`EclipseIO`] session turns an [`EclipseState`] and the per-step
//! results of a simulator into the three files Eclipse post-processors
//! read:
//!
//! - `<NAME>.EGRID`: grid geometry and ACTNUM ([`EclipseIO::initialize`])
//! - `<NAME>.INIT`: static cell properties ([`EclipseIO::write_initial`])
//! - `<NAME>.UNRST`: one restart record per report step
//!   ([`EclipseIO::write_time_step`])
//!
//! Values are handed over in SI units and converted to the deck's unit
//! system on output.
//!
//! # Restart points
//!
//! The restart file never holds records out of order. Writing step `n`
//! drops every record with a sequence number `>= n` before appending, so
//! a run restarted from step `n` leaves the same file as an uninterrupted
//! run would.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod convert;
mod egrid;
pub mod error;
pub mod header;
mod init;
pub mod restart;
pub mod session;
pub mod state;

pub use config::{ConfigError, OutputConfig};
pub use error::OutputError;
pub use session::{EclipseIO, WriterState};
pub use state::{EclipseState, IoConfig, Phases};
