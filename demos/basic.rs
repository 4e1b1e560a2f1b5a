//! Basic tour of the Desk API client.
//!
//! Run with:
//! ```
//! DESK_API_KEY=your-key DESK_BASE_URL=https://acme.teamwork.com/desk/api/v2 \
//!     cargo run --example basic
//! ```

use std::time::Duration;

use desk_client::middleware::{Logging, Retry, Timeout};
use desk_client::{
    DeskClient, FilterBuilder, Get, List, ListOptions, SearchTicketsFilter, User,
};

#[tokio::main]
async fn main() -> desk_client::Result<()> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("DESK_API_KEY").unwrap_or_default();
    let base_url = std::env::var("DESK_BASE_URL")
        .unwrap_or_else(|_| "https://mycompany.teamwork.com/desk/api/v2".to_string());

    let client = DeskClient::builder(base_url)
        .api_key(api_key)
        .middleware(Logging)
        .middleware(Retry::new(2, Duration::from_millis(500)))
        .middleware(Timeout::new(Duration::from_secs(15)))
        .build()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Inboxes ---");
    let inboxes = client.inboxes().list(&ListOptions::for_page(1, 10)).await?;
    for inbox in &inboxes.inboxes {
        println!("  [{}] {} <{}>", inbox.base.id, inbox.name, inbox.email);
    }

    println!("\n--- Open tickets in the first inbox ---");
    if let Some(inbox) = inboxes.inboxes.first() {
        let filter = FilterBuilder::new()
            .eq("inbox", inbox.base.id)
            .ne("status", "closed");
        let page = client
            .tickets()
            .list(&ListOptions::for_page(1, 5).filter(&filter))
            .await?;
        for ticket in &page.tickets {
            println!("  [{}] {}", ticket.base.id, ticket.subject);
        }

        if let Some(first) = page.tickets.first() {
            let full = client.tickets().get(first.base.id).await?;
            let users: Vec<User> = full.included.collection("users")?;
            println!(
                "\nTicket {} has {} included users",
                full.ticket.base.id,
                users.len()
            );
        }
    }

    println!("\n--- Search ---");
    let found = client
        .tickets()
        .search(&SearchTicketsFilter {
            search: Some("refund".to_string()),
            ..Default::default()
        })
        .await?;
    println!("  {} matching tickets", found.pagination.records);

    Ok(())
}
