//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    BaseEntity, BusinessHour, Company, Customer, EntityRef, Inbox, InboxMeta, InboxUser, Tag,
    Ticket, TicketPriority, TicketSource, TicketStatus, TicketType, User,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A helpdesk with one of everything a generated ticket or SLA needs.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub users: Vec<User>,
    pub inboxes: Vec<Inbox>,
    pub customers: Vec<Customer>,
    pub companies: Vec<Company>,
    pub tags: Vec<Tag>,
    pub ticket_types: Vec<TicketType>,
    pub ticket_sources: Vec<TicketSource>,
    pub ticket_statuses: Vec<TicketStatus>,
    pub ticket_priorities: Vec<TicketPriority>,
    pub business_hours: Vec<BusinessHour>,
    pub tickets: Vec<Ticket>,
}

fn base(id: u64) -> BaseEntity {
    BaseEntity {
        id,
        state: Some("active".to_string()),
        ..Default::default()
    }
}

impl Fixtures {
    pub fn user(id: u64, first_name: &str, email: &str) -> User {
        User {
            base: base(id),
            first_name: first_name.to_string(),
            last_name: "Agent".to_string(),
            email: email.to_string(),
            role: Some("admin".to_string()),
            ..Default::default()
        }
    }

    /// An inbox every listed agent can write to.
    pub fn inbox(id: u64, name: &str, agents: &[u64]) -> Inbox {
        Inbox {
            base: base(id),
            name: name.to_string(),
            email: format!("{}@support.example.com", name.to_lowercase()),
            local_part: name.to_lowercase(),
            users: agents
                .iter()
                .map(|&id| InboxUser {
                    id,
                    kind: Some("users".to_string()),
                    meta: InboxMeta {
                        access: "write".to_string(),
                    },
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn customer(id: u64, first_name: &str, last_name: &str, email: &str) -> Customer {
        Customer {
            base: base(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    pub fn company(id: u64, name: &str) -> Company {
        Company {
            base: base(id),
            name: name.to_string(),
            description: format!("{name} is a customer account"),
            ..Default::default()
        }
    }

    pub fn tag(id: u64, name: &str) -> Tag {
        Tag {
            base: base(id),
            name: name.to_string(),
            color: Some("blue".to_string()),
        }
    }

    /// A ticket type offered in the given inboxes.
    pub fn ticket_type(id: u64, name: &str, inboxes: &[u64]) -> TicketType {
        TicketType {
            base: base(id),
            name: name.to_string(),
            inboxes: inboxes.iter().copied().map(EntityRef::new).collect(),
            ..Default::default()
        }
    }

    pub fn ticket_source(id: u64, name: &str) -> TicketSource {
        TicketSource {
            base: base(id),
            name: name.to_string(),
        }
    }

    pub fn ticket_status(id: u64, name: &str) -> TicketStatus {
        TicketStatus {
            base: base(id),
            name: name.to_string(),
            code: Some(name.to_lowercase()),
            ..Default::default()
        }
    }

    pub fn ticket_priority(id: u64, name: &str, color: &str) -> TicketPriority {
        TicketPriority {
            base: base(id),
            name: name.to_string(),
            color: color.to_string(),
            ..Default::default()
        }
    }

    pub fn business_hour(id: u64, name: &str) -> BusinessHour {
        BusinessHour {
            base: base(id),
            name: name.to_string(),
            is_default: true,
            timezone: Some("UTC".to_string()),
        }
    }

    /// An open ticket from `customer` in `inbox`.
    pub fn ticket(id: u64, subject: &str, inbox: u64, customer: u64) -> Ticket {
        Ticket {
            base: base(id),
            subject: subject.to_string(),
            body: format!("{subject}\n\nPlease advise."),
            preview_text: subject.to_string(),
            inbox: EntityRef::new(inbox),
            customer: EntityRef::new(customer),
            status: Some(EntityRef::new(1)),
            message_count: 1,
            ..Default::default()
        }
    }

    /// Create a default scenario with common test data.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            users: vec![
                Self::user(1, "Avery", "avery@example.com"),
                Self::user(2, "Jordan", "jordan@example.com"),
            ],
            inboxes: vec![
                Self::inbox(1, "Support", &[1, 2]),
                Self::inbox(2, "Billing", &[2]),
            ],
            customers: vec![Self::customer(1, "Sam", "Rivera", "sam@customer.example")],
            companies: vec![Self::company(1, "Customer Corp")],
            tags: vec![Self::tag(1, "vip"), Self::tag(2, "bug")],
            ticket_types: vec![
                Self::ticket_type(1, "Question", &[1]),
                Self::ticket_type(2, "Invoice", &[2]),
            ],
            ticket_sources: vec![Self::ticket_source(1, "Email")],
            ticket_statuses: vec![
                Self::ticket_status(1, "Active"),
                Self::ticket_status(2, "Closed"),
            ],
            ticket_priorities: vec![
                Self::ticket_priority(1, "Low", "green"),
                Self::ticket_priority(2, "High", "red"),
            ],
            business_hours: vec![Self::business_hour(1, "Office Hours")],
            tickets: vec![
                Self::ticket(1, "Cannot log in", 1, 1),
                Self::ticket(2, "Refund for order 1234", 2, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_links_types_to_inboxes() {
        let scenario = Fixtures::default_scenario();
        let inbox_ids: Vec<u64> = scenario.inboxes.iter().map(|i| i.base.id).collect();

        for ticket_type in &scenario.ticket_types {
            assert!(ticket_type
                .inboxes
                .iter()
                .any(|r| inbox_ids.contains(&r.id)));
        }
    }

    #[test]
    fn test_inbox_grants_write_access() {
        let inbox = Fixtures::inbox(3, "Sales", &[4, 5]);
        assert_eq!(inbox.users.len(), 2);
        assert!(inbox.users.iter().all(|u| u.meta.access == "write"));
        assert_eq!(inbox.email, "sales@support.example.com");
    }
}
