pub mod auth;
pub mod board;
pub mod container;
pub mod prefs;
pub mod state;
pub mod sync;
pub mod task;
