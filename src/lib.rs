// ProblemList - In-memory problem list with live search

pub mod config;
pub mod entry;
pub mod query;
pub mod render;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use entry::Entry;
pub use query::{Query, normalize, visible_positions};
pub use session::{Mode, Session};
pub use store::{ListStore, StoreError, StoreEvent};
