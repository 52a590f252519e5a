pub mod auth;
pub mod bounty;
pub mod builder;
pub mod config;
pub mod connection_code;
pub mod db;
pub mod error;
pub mod feature;
pub mod metrics;
pub mod review;
pub mod testing;
pub mod ticket;

pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, AuthRequest, Authenticator, Identity,
    NoneAuthenticator,
};
pub use bounty::{Bounty, BountyError, BountyStore, NewBounty, SqliteBountyStore, StatusCounts};
pub use builder::{
    BuilderClient, DispatchError, DispatchReceipt, DispatchState, DispatchTicket,
    HttpBuilderClient, JobRequest, WorkflowDispatcher, REVIEW_CALLBACK_PATH,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, BuilderConfig, Config,
    ConfigError, SanitizedConfig,
};
pub use connection_code::{
    ConnectionCode, ConnectionCodeError, ConnectionCodeShort, ConnectionCodeStore,
    DispenseOrder, NewConnectionCode, SqliteConnectionCodeStore,
};
pub use db::{Database, DatabaseError};
pub use error::ErrorKind;
pub use feature::{
    Feature, FeatureDirectory, FeatureError, FeaturePhase, SqliteFeatureDirectory, Workspace,
};
pub use review::{ReviewError, ReviewIngestor, ReviewRequest};
pub use ticket::{
    SqliteTicketStore, Ticket, TicketError, TicketPayload, TicketStatus, TicketStore,
    TicketUpsert,
};
