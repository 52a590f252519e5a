use std::sync::Arc;

use bountydesk_core::{
    Authenticator, BountyStore, Config, ConnectionCodeStore, FeatureDirectory, ReviewIngestor,
    SanitizedConfig, TicketStore, WorkflowDispatcher,
};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    bounty_store: Arc<dyn BountyStore>,
    ticket_store: Arc<dyn TicketStore>,
    connection_code_store: Arc<dyn ConnectionCodeStore>,
    features: Arc<dyn FeatureDirectory>,
    dispatcher: WorkflowDispatcher,
    reviews: ReviewIngestor,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        bounty_store: Arc<dyn BountyStore>,
        ticket_store: Arc<dyn TicketStore>,
        connection_code_store: Arc<dyn ConnectionCodeStore>,
        features: Arc<dyn FeatureDirectory>,
        dispatcher: WorkflowDispatcher,
    ) -> Self {
        let reviews = ReviewIngestor::new(Arc::clone(&ticket_store));
        Self {
            config,
            authenticator,
            bounty_store,
            ticket_store,
            connection_code_store,
            features,
            dispatcher,
            reviews,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn bounty_store(&self) -> &dyn BountyStore {
        self.bounty_store.as_ref()
    }

    pub fn ticket_store(&self) -> &dyn TicketStore {
        self.ticket_store.as_ref()
    }

    pub fn connection_code_store(&self) -> &dyn ConnectionCodeStore {
        self.connection_code_store.as_ref()
    }

    pub fn features(&self) -> &dyn FeatureDirectory {
        self.features.as_ref()
    }

    pub fn dispatcher(&self) -> &WorkflowDispatcher {
        &self.dispatcher
    }

    pub fn reviews(&self) -> &ReviewIngestor {
        &self.reviews
    }
}
