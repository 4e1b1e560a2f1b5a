//! Listener lifecycle and routing for the mock Desk API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A Desk API stand-in bound to a local ephemeral port.
///
/// The axum app runs on a spawned task until [`MockServer::shutdown`] is
/// called or the runtime stops.
pub struct MockServer {
    /// `http://127.0.0.1:{port}`, without a trailing slash.
    url: String,
    handle: JoinHandle<()>,
    /// Store behind every handler; tests may read or seed it directly.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve the [`DefaultScenario`] helpdesk.
    pub async fn start() -> Self {
        Self::with_state(Self::state_from_scenario(Fixtures::default_scenario())).await
    }

    /// Serve empty collections.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve `state`. Its `base_url` is overwritten with the bound address
    /// so upload descriptors point back here.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared = state.shared();
        let app = Self::create_router(Arc::clone(&shared));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock server could not bind a local port");
        let addr = listener
            .local_addr()
            .expect("bound listener has a local address");
        let url = format!("http://{addr}");
        shared.write().await.base_url = url.clone();

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url,
            handle,
            state: shared,
        }
    }

    /// Base URL to hand to `DeskClient::new`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> Arc<RwLock<MockState>> {
        Arc::clone(&self.state)
    }

    /// Stop serving and wait for the task to finish.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for user in &scenario.users {
            state = state.with_entity("users", user);
        }
        for inbox in &scenario.inboxes {
            state = state.with_entity("inboxes", inbox);
        }
        for customer in &scenario.customers {
            state = state.with_entity("customers", customer);
        }
        for company in &scenario.companies {
            state = state.with_entity("companies", company);
        }
        for tag in &scenario.tags {
            state = state.with_entity("tags", tag);
        }
        for ticket_type in &scenario.ticket_types {
            state = state.with_entity("tickettypes", ticket_type);
        }
        for source in &scenario.ticket_sources {
            state = state.with_entity("ticketsources", source);
        }
        for status in &scenario.ticket_statuses {
            state = state.with_entity("ticketstatuses", status);
        }
        for priority in &scenario.ticket_priorities {
            state = state.with_entity("ticketpriorities", priority);
        }
        for business_hour in &scenario.business_hours {
            state = state.with_entity("businesshours", business_hour);
        }
        for ticket in &scenario.tickets {
            state = state.with_entity("tickets", ticket);
        }

        state
    }

    /// Paths carry the client's `.json` suffix, so routes match on whole
    /// segments and the handlers resolve the collection.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route(
                "/:segment",
                get(handlers::list_entities).post(handlers::create_entity),
            )
            .route(
                "/:resource/:segment",
                get(handlers::get_entity)
                    .put(handlers::update_entity)
                    .post(handlers::create_file_ref),
            )
            .with_state(state)
    }
}
