//! Tickets: scoped units of work inside a feature phase.

mod sqlite_store;
mod store;
mod types;
mod validation;

pub use sqlite_store::SqliteTicketStore;
pub use store::{TicketError, TicketStore};
pub use types::{Ticket, TicketStatus, TicketUpsert};
pub use validation::{parse_status, parse_uuid, TicketPayload};
