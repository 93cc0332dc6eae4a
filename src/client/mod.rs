//! Headless client for the devlink API.
//!
//! State management follows the action/reducer split: [`store::Store`]
//! holds a [`store::ClientState`] snapshot, [`reducers`] are pure
//! functions from state and action to the next state, and [`actions`]
//! are the only place requests happen. [`components`] renders state to
//! plain text for the demo binary.

pub mod actions;
pub mod api;
pub mod components;
pub mod reducers;
pub mod store;
