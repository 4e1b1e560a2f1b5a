//! In-memory Desk API for end-to-end tests.
//!
//! Where wiremock answers canned responses per test, [`MockServer`] keeps
//! a store across requests: created entities get IDs and can be fetched,
//! listed and updated afterwards, `files/ref` hands out an upload target on
//! the same server, and `search/tickets` filters the stored tickets.
//!
//! # Example
//!
//! ```ignore
//! use desk_client::mock_server::MockServer;
//! use desk_client::{DeskClient, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = DeskClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let ticket = client.tickets().get(1).await.unwrap();
//!     assert_eq!(ticket.ticket.subject, "Cannot log in");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{resource, MockState, ResourceKind, Upload, RESOURCES};
