//! Teamwork Desk API client library.
//!
//! A typed client for the Desk REST API built around a generic service:
//! every resource exposes the same [`Get`], [`List`], [`Create`] and
//! [`Update`] operations over its own envelope types, and every call runs
//! through a configurable middleware pipeline.
//!
//! # Quick Start
//!
//! ```no_run
//! use desk_client::{DeskClient, FilterBuilder, Get, List, ListOptions};
//!
//! #[tokio::main]
//! async fn main() -> desk_client::Result<()> {
//!     // Create client from environment variables
//!     let client = DeskClient::from_env()?;
//!
//!     // Get a ticket by ID
//!     let ticket = client.tickets().get(42).await?;
//!     println!("Ticket: {}", ticket.ticket.subject);
//!
//!     // List open tickets, newest first
//!     let filter = FilterBuilder::new().eq("status", "open");
//!     let options = ListOptions::for_page(1, 50)
//!         .sort("createdAt", "desc")
//!         .filter(&filter);
//!     let page = client.tickets().list(&options).await?;
//!     println!("Found {} tickets", page.pagination.records);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`DeskClient`] holds configuration and the [`middleware::Pipeline`].
//! - [`Service`] implements the four operations for any resource, given
//!   its envelopes and a [`PathHandler`].
//! - Accessors such as [`DeskClient::tickets`] return ready-bound services.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `DESK_API_KEY` (required) - Your Desk API key
//! - `DESK_BASE_URL` (optional) - Base URL (defaults to
//!   `https://mycompany.teamwork.com/desk/api/v2`)

mod client;
mod error;
mod filter;
mod pagination;
mod path;
mod resources;
mod service;
mod traits;

pub mod cli;
pub mod generate;
pub mod middleware;
pub mod models;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientBuilder, DeskClient};
pub use error::{DeskError, Result};
pub use filter::{FilterBuilder, FilterOperator};
pub use pagination::{ListOptions, Pagination};
pub use path::PathHandler;
pub use service::Service;

// Re-export traits
pub use traits::{Create, Get, List, Update};

// Re-export resource services
pub use resources::{
    BusinessHourService, CompanyService, CustomerService, FileService, HelpDocArticleService,
    HelpDocSiteService, InboxService, SlaService, SpamlistService, TagService,
    TicketPriorityService, TicketService, TicketSourceService, TicketStatusService,
    TicketTypeService, UserService,
};

// Re-export models
pub use models::*;

// Cancellation handle accepted by `DeskClient::with_cancellation`
pub use tokio_util::sync::CancellationToken;
