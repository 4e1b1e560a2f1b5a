//! Fixture generation for the `deskgen` binary.
//!
//! A [`Generator`] runs one [`Action`] against one [`Resource`]. For create
//! and update it builds a plausible entity from random values, looking up
//! any entities it must reference first, and overlays the caller's
//! `--data` object.

pub mod fake;
mod merge;

use std::future::{self, Future};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::cli::{Action, Resource};
use crate::client::DeskClient;
use crate::error::DeskError;
use crate::models::*;
use crate::pagination::ListOptions;
use crate::traits::{Create, Get, List, Update};

pub use merge::merge_json;

// Upper bounds on the entities a generated SLA is scoped to.
const SLA_MAX_INBOXES: usize = 5;
const SLA_MAX_COMPANIES: usize = 5;
const SLA_MAX_CUSTOMERS: usize = 4;
const SLA_MAX_TAGS: usize = 7;

/// Errors raised while generating fixtures.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An entity the generated one must reference does not exist yet.
    #[error("No {0} found. Please create one first.")]
    MissingPrerequisite(&'static str),

    #[error("No ticket types associated with the available inboxes.")]
    NoMatchingTicketType,

    #[error("Unsupported resource: {0}")]
    UnsupportedResource(String),

    /// `--data` does not fit the entity.
    #[error("Failed to merge JSON data: {0}")]
    Merge(#[source] serde_json::Error),

    #[error("Failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Api(#[from] DeskError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Runs generator actions with one client.
#[derive(Debug, Clone)]
pub struct Generator {
    client: DeskClient,
    data: Option<Map<String, Value>>,
}

impl Generator {
    pub fn new(client: DeskClient, data: Option<Map<String, Value>>) -> Self {
        Self { client, data }
    }

    /// Run `action` on `resource` and return the API response as JSON.
    ///
    /// `id` is used by get and update only. For files, create also uploads
    /// placeholder contents to the returned storage target.
    pub async fn run(&self, resource: Resource, action: Action, id: u64) -> Result<Value> {
        let c = &self.client;
        match resource {
            Resource::BusinessHours => {
                call(&c.business_hours(), action, id, || future::ready(self.business_hour())).await
            }
            Resource::Companies => {
                call(&c.companies(), action, id, || future::ready(self.company())).await
            }
            Resource::Customers => {
                call(&c.customers(), action, id, || future::ready(self.customer())).await
            }
            Resource::Files if action == Action::Create => self.create_file().await,
            Resource::Files => call(&c.files(), action, id, || future::ready(self.file())).await,
            Resource::HelpDocArticles => {
                call(&c.help_doc_articles(), action, id, || future::ready(self.help_doc_article()))
                    .await
            }
            Resource::HelpDocSites => {
                call(&c.help_doc_sites(), action, id, || future::ready(self.help_doc_site())).await
            }
            Resource::Inboxes => call(&c.inboxes(), action, id, || self.inbox()).await,
            Resource::Priorities => {
                call(&c.ticket_priorities(), action, id, || future::ready(self.ticket_priority()))
                    .await
            }
            Resource::Slas => call(&c.slas(), action, id, || self.sla()).await,
            Resource::Spamlists => {
                call(&c.spamlists(), action, id, || future::ready(self.spamlist())).await
            }
            Resource::Statuses => {
                call(&c.ticket_statuses(), action, id, || future::ready(self.ticket_status())).await
            }
            Resource::Tags => call(&c.tags(), action, id, || future::ready(self.tag())).await,
            Resource::Tickets => call(&c.tickets(), action, id, || self.ticket()).await,
            Resource::Types => {
                call(&c.ticket_types(), action, id, || future::ready(self.ticket_type())).await
            }
            Resource::Users => call(&c.users(), action, id, || future::ready(self.user())).await,
            Resource::All => Err(GenerateError::UnsupportedResource(resource.name())),
        }
    }

    fn merge<T>(&self, entity: &mut T) -> Result<()>
    where
        T: Serialize + serde::de::DeserializeOwned,
    {
        match &self.data {
            Some(data) => merge_json(entity, data).map_err(GenerateError::Merge),
            None => Ok(()),
        }
    }

    fn business_hour(&self) -> Result<BusinessHourResponse> {
        let mut business_hour = BusinessHour {
            name: format!("{} Business Hours", fake::company()),
            is_default: true,
            ..Default::default()
        };
        self.merge(&mut business_hour)?;
        Ok(business_hour.into())
    }

    fn company(&self) -> Result<CompanyResponse> {
        let mut company = Company {
            name: fake::company(),
            description: fake::paragraph(2, 3, " "),
            ..Default::default()
        };
        self.merge(&mut company)?;

        let mut envelope = CompanyResponse::from(company);
        envelope.included.domains.push(Domain {
            name: fake::domain_name(),
            ..Default::default()
        });
        Ok(envelope)
    }

    fn customer(&self) -> Result<CustomerResponse> {
        let email = fake::email();
        let mut customer = Customer {
            first_name: fake::first_name(),
            last_name: fake::last_name(),
            email: email.clone(),
            ..Default::default()
        };
        self.merge(&mut customer)?;

        let mut envelope = CustomerResponse::from(customer);
        envelope.included.contacts.push(Contact {
            kind: "email".to_string(),
            value: email,
            is_main: true,
            ..Default::default()
        });
        Ok(envelope)
    }

    fn file(&self) -> Result<FileResponse> {
        let mut file = File {
            filename: format!("{}.{}", fake::word(), fake::file_extension()),
            mime_type: "image/jpeg".to_string(),
            kind: FileType::Attachment,
            disposition: Disposition::Attachment,
            ..Default::default()
        };
        self.merge(&mut file)?;
        Ok(FileResponse {
            file,
            ..Default::default()
        })
    }

    /// Reserve a file reference, then upload placeholder bytes to it.
    async fn create_file(&self) -> Result<Value> {
        let files = self.client.files();
        let descriptor = files.create(&self.file()?).await?;
        files.upload(&descriptor, fake::jpeg(800, 600)).await?;
        serde_json::to_value(&descriptor).map_err(GenerateError::Encode)
    }

    fn help_doc_article(&self) -> Result<HelpDocArticleResponse> {
        let mut article = HelpDocArticle {
            title: fake::sentence(5),
            contents: paragraphs(3),
            ..Default::default()
        };
        self.merge(&mut article)?;
        Ok(article.into())
    }

    fn help_doc_site(&self) -> Result<HelpDocSiteResponse> {
        let mut site = HelpDocSite {
            name: format!("{} Help Center", fake::company()),
            ..Default::default()
        };
        self.merge(&mut site)?;
        Ok(site.into())
    }

    async fn inbox(&self) -> Result<InboxResponse> {
        let users = self.client.users().list(&ListOptions::default()).await?.users;
        require(&users, "users")?;

        let address = fake::email();
        let local_part = address.split('@').next().unwrap_or_default().to_string();
        let mut inbox = Inbox {
            name: format!("{} Inbox", fake::company()),
            email: fake::email(),
            local_part,
            users: users
                .iter()
                .map(|user| InboxUser {
                    id: user.base.id,
                    kind: None,
                    meta: InboxMeta {
                        access: "write".to_string(),
                    },
                })
                .collect(),
            ..Default::default()
        };
        self.merge(&mut inbox)?;
        Ok(inbox.into())
    }

    async fn sla(&self) -> Result<SlaResponse> {
        let none = ListOptions::default();
        let c = &self.client;

        let priorities = c.ticket_priorities().list(&none).await?.ticketpriorities;
        require(&priorities, "ticket priorities")?;
        let tags = c.tags().list(&none).await?.tags;
        require(&tags, "tags")?;
        let companies = c.companies().list(&none).await?.companies;
        require(&companies, "companies")?;
        let customers = c.customers().list(&none).await?.customers;
        require(&customers, "customers")?;
        let inboxes = c.inboxes().list(&none).await?.inboxes;
        require(&inboxes, "inboxes")?;
        let business_hours = c.business_hours().list(&none).await?.businesshours;
        let business_hour = require(&business_hours, "business hours")?;

        let mut sla = Sla {
            name: format!("{} SLA Policy", fake::company()),
            business_hour: Some(EntityRef::new(business_hour.base.id)),
            ..Default::default()
        };
        self.merge(&mut sla)?;

        let mut envelope = SlaResponse::from(sla);
        let included = &mut envelope.included;

        included.sla_notifications = vec![
            SlaNotification {
                condition: SlaNotificationCondition::Warning,
                kind: SlaNotificationType::FirstResponse,
                duration: fake::number(1, 10),
                notify_assigned_user: true,
                ..Default::default()
            },
            SlaNotification {
                condition: SlaNotificationCondition::Breach,
                kind: SlaNotificationType::FirstResponse,
                duration: 0,
                notify_assigned_user: true,
                ..Default::default()
            },
        ];

        included.sla_priorities = priorities
            .iter()
            .map(|p| priority_target(format!("SLA for {}", p.name), Some(p.base.id)))
            .chain(std::iter::once(priority_target("SLA for None".to_string(), None)))
            .collect();

        included.sla_inboxes = inboxes
            .iter()
            .take(SLA_MAX_INBOXES)
            .map(|inbox| SlaInbox {
                inbox: Some(EntityRef::new(inbox.base.id)),
                condition: SlaConditionOption::Equal,
            })
            .collect();

        included.sla_companies = companies
            .iter()
            .take(SLA_MAX_COMPANIES)
            .map(|company| SlaCompany {
                company: Some(EntityRef::new(company.base.id)),
                condition: SlaConditionOption::Equal,
            })
            .collect();

        included.sla_customers = customers
            .iter()
            .take(SLA_MAX_CUSTOMERS)
            .map(|customer| SlaCustomer {
                customer: Some(EntityRef::new(customer.base.id)),
                condition: SlaConditionOption::Equal,
            })
            .collect();

        included.sla_tags = tags
            .iter()
            .take(SLA_MAX_TAGS)
            .map(|tag| SlaTag {
                tag: Some(EntityRef::new(tag.base.id)),
                condition: SlaConditionOption::Equal,
            })
            .collect();

        Ok(envelope)
    }

    fn spamlist(&self) -> Result<SpamlistResponse> {
        let mut spamlist = Spamlist {
            term: fake::email(),
            kind: "blacklist".to_string(),
            ..Default::default()
        };
        self.merge(&mut spamlist)?;
        Ok(spamlist.into())
    }

    fn tag(&self) -> Result<TagResponse> {
        let mut tag = Tag {
            name: fake::word(),
            ..Default::default()
        };
        self.merge(&mut tag)?;
        Ok(tag.into())
    }

    async fn ticket(&self) -> Result<TicketResponse> {
        let none = ListOptions::default();
        let c = &self.client;

        let inboxes = c.inboxes().list(&none).await?.inboxes;
        require(&inboxes, "inboxes")?;
        let customers = c.customers().list(&none).await?.customers;
        let customer = require(&customers, "customers")?;
        let types = c.ticket_types().list(&none).await?.tickettypes;
        require(&types, "ticket types")?;
        let (ticket_type, inbox) =
            match_ticket_type(&types, &inboxes).ok_or(GenerateError::NoMatchingTicketType)?;
        let sources = c.ticket_sources().list(&none).await?.ticketsources;
        let source = require(&sources, "ticket sources")?;
        let statuses = c.ticket_statuses().list(&none).await?.ticketstatuses;
        let status = require(&statuses, "ticket statuses")?;
        let agents = c.users().list(&none).await?.users;
        require(&agents, "users")?;

        let mut ticket = Ticket {
            subject: fake::sentence(1),
            preview_text: fake::paragraph(2, 3, " "),
            original_recipient: fake::email(),
            inbox: EntityRef::new(inbox.base.id),
            customer: EntityRef::new(customer.base.id),
            ticket_type: Some(EntityRef::new(ticket_type.base.id)),
            source: Some(EntityRef::new(source.base.id)),
            status: Some(EntityRef::new(status.base.id)),
            body: paragraphs(3),
            ..Default::default()
        };
        self.merge(&mut ticket)?;
        Ok(ticket.into())
    }

    fn ticket_priority(&self) -> Result<TicketPriorityResponse> {
        let mut priority = TicketPriority {
            name: fake::word(),
            color: fake::safe_color(),
            ..Default::default()
        };
        self.merge(&mut priority)?;
        Ok(priority.into())
    }

    fn ticket_status(&self) -> Result<TicketStatusResponse> {
        let mut status = TicketStatus {
            name: fake::word(),
            ..Default::default()
        };
        self.merge(&mut status)?;
        Ok(status.into())
    }

    fn ticket_type(&self) -> Result<TicketTypeResponse> {
        let mut ticket_type = TicketType {
            name: fake::word(),
            ..Default::default()
        };
        self.merge(&mut ticket_type)?;
        Ok(ticket_type.into())
    }

    fn user(&self) -> Result<UserResponse> {
        let mut user = User {
            first_name: fake::first_name(),
            last_name: fake::last_name(),
            email: fake::email(),
            ..Default::default()
        };
        self.merge(&mut user)?;
        Ok(user.into())
    }
}

/// Dispatch `action` to `service`. `build` runs only for create and update.
async fn call<S, T, F, Fut>(service: &S, action: Action, id: u64, build: F) -> Result<Value>
where
    S: Get<Entity = T> + List + Create<Entity = T> + Update<Entity = T> + Sync,
    S::Page: Serialize,
    T: Serialize + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let value = match action {
        Action::Get => serde_json::to_value(service.get(id).await?),
        Action::List => serde_json::to_value(service.list(&ListOptions::default()).await?),
        Action::Create => {
            let entity = build().await?;
            serde_json::to_value(service.create(&entity).await?)
        }
        Action::Update => {
            let entity = build().await?;
            serde_json::to_value(service.update(id, &entity).await?)
        }
    };
    value.map_err(GenerateError::Encode)
}

/// First entity of a prerequisite listing, or a named error when empty.
fn require<'a, T>(items: &'a [T], resource: &'static str) -> Result<&'a T> {
    items.first().ok_or(GenerateError::MissingPrerequisite(resource))
}

/// The ticket type to file a generated ticket under, with the inbox it
/// was matched on. When several types match, the last one listed wins.
fn match_ticket_type<'a>(
    types: &'a [TicketType],
    inboxes: &'a [Inbox],
) -> Option<(&'a TicketType, &'a Inbox)> {
    let mut matched = None;
    for ticket_type in types {
        for inbox in inboxes {
            if ticket_type.inboxes.iter().any(|r| r.id == inbox.base.id) {
                matched = Some((ticket_type, inbox));
            }
        }
    }
    matched
}

fn priority_target(description: String, priority: Option<u64>) -> SlaTicketPriority {
    SlaTicketPriority {
        hours: fake::number(1, 10),
        minutes: fake::number(1, 59),
        description,
        ticket_priority: priority.map(EntityRef::new),
        ..Default::default()
    }
}

fn paragraphs(count: usize) -> String {
    (0..count)
        .map(|_| fake::paragraph(5, 10, " "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbox(id: u64) -> Inbox {
        Inbox {
            base: BaseEntity {
                id,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ticket_type(id: u64, inboxes: &[u64]) -> TicketType {
        TicketType {
            base: BaseEntity {
                id,
                ..Default::default()
            },
            inboxes: inboxes.iter().copied().map(EntityRef::new).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_last_matching_ticket_type_wins() {
        let inboxes = [inbox(1), inbox(2)];
        let types = [
            ticket_type(10, &[1]),
            ticket_type(11, &[99]),
            ticket_type(12, &[2]),
        ];

        let (matched, inbox) = match_ticket_type(&types, &inboxes).unwrap();
        assert_eq!(matched.base.id, 12);
        assert_eq!(inbox.base.id, 2);
    }

    #[test]
    fn test_no_ticket_type_for_inboxes() {
        let inboxes = [inbox(1)];
        let types = [ticket_type(10, &[5]), ticket_type(11, &[])];
        assert!(match_ticket_type(&types, &inboxes).is_none());
    }

    #[test]
    fn test_require_names_the_missing_resource() {
        let empty: [User; 0] = [];
        let err = require(&empty, "users").unwrap_err();
        assert_eq!(err.to_string(), "No users found. Please create one first.");
    }

    #[test]
    fn test_generated_customer_has_main_email_contact() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let generator = Generator::new(client, None);

        let envelope = generator.customer().unwrap();
        let contact = &envelope.included.contacts[0];
        assert_eq!(contact.kind, "email");
        assert_eq!(contact.value, envelope.customer.email);
        assert!(contact.is_main);
    }

    #[test]
    fn test_data_overrides_generated_values() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let mut data = Map::new();
        data.insert("name".to_string(), Value::from("Escalations"));
        let generator = Generator::new(client, Some(data));

        let envelope = generator.ticket_status().unwrap();
        assert_eq!(envelope.ticketstatus.name, "Escalations");
    }

    #[tokio::test]
    async fn test_all_is_not_a_single_resource() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let generator = Generator::new(client, None);

        let err = generator.run(Resource::All, Action::List, 0).await.unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedResource(name) if name == "all"));
    }
}
