pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use client::{HttpClient, Transport};
pub use error::{ClientError, PersistError, StoreError};
pub use persist::{FileStorage, MemoryStorage, Persistence, Storage};
pub use store::{AppState, Session, Store};
