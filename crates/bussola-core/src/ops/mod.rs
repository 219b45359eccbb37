//! Pure state transitions: `(&AppData, args) -> AppData`.
//!
//! Identical inputs always produce identical outputs. Ids and timestamps are
//! passed in by the caller (normally [`crate::Store`]).

pub mod checkin;
pub mod experiment;
pub mod user;

pub use checkin::{
    add_checkin, add_priority, edit_priority, remove_priority, reorder_priorities,
    toggle_priority, update_checkin,
};
pub use experiment::{
    add_experiment, add_note, advance_phase, edit_experiment, finalize_experiment,
    remove_experiment, update_experiment,
};
pub use user::{complete_onboarding, update_user};
