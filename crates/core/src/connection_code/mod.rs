//! Single-use connection codes: batch issuance and one-at-a-time dispense.

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteConnectionCodeStore;
pub use store::{ConnectionCodeError, ConnectionCodeStore};
pub use types::{ConnectionCode, ConnectionCodeShort, DispenseOrder, NewConnectionCode};
