//! # GCS Demo Console
//!
//! Interactive console for exercising the Google Cloud Storage XML API:
//! a numbered menu of bucket and object operations, prompting for each
//! parameter and dispatching one API call per selection.
//!
//! The API surface itself lives in [`gcs_client`]; this crate adds:
//! - **Menu loop**: selection parsing and command dispatch
//! - **Prompting pipeline**: required fields, blank-means-default fields,
//!   comma-separated lists
//! - **File handling**: upload source preparation and download targets
//! - **Bootstrap**: flags, `.env`, logging, project-id persistence

pub mod commands;
pub mod files;
pub mod input;
pub mod menu;
pub mod project;

pub use input::Prompter;
