//! Test fixtures and file helpers for eclio development.
//!
//! [`fixtures`] builds the reference input models used across the
//! integration tests; [`files`] reads written output back for
//! assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod files;
pub mod fixtures;

pub use files::{file_size, find_keyword, read_keywords, restart_record};
pub use fixtures::{
    create_blackoil_state, elapsed_seconds, init_extras, reference_state, restart_solution,
    summary_deck, REFERENCE_CELLS,
};
