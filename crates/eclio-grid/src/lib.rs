//! Grid, property and schedule models for Eclipse output.
//!
//! These are the read-only inputs the writer consumes. A deck parser
//! populates them; this crate only validates shapes and answers the
//! index and geometry queries the writer needs.
//!
//! # Models
//!
//! - [`EclipseGrid`]: corner-point geometry (COORD/ZCORN), ACTNUM and the
//!   IJK ⇄ global ⇄ active index mapping
//! - [`GridProperties`]: static per-cell keyword arrays (PORO, FIPNUM, ...)
//! - [`Schedule`]: wells, their completions over time, and the [`TimeMap`]
//!
//! # Region Cache
//!
//! [`RegionCache`] is a derived, immutable index from FIPNUM region id to
//! the active cells and well completions inside that region.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod properties;
pub mod region;
pub mod schedule;

pub use error::GridError;
pub use grid::EclipseGrid;
pub use properties::GridProperties;
pub use region::RegionCache;
pub use schedule::{CompletionSpec, Phase, Schedule, ScheduleWell, TimeMap};
