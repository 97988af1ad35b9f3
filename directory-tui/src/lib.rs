//! Staffdeck - employee directory management console
//!
//! A terminal screen over the remote Employee service: a paged table of
//! records, a modal create/edit form with a dynamic address sub-list, and a
//! guarded delete. The collection is re-read in full after every successful
//! mutation.

pub mod app;
pub mod form;
pub mod logger;
pub mod requests;
pub mod ui;

pub use app::{Action, ApiEvent, App, Mode, PAGE_SIZE};
pub use form::{FormMode, FormState};
