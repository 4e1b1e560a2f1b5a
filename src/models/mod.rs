//! Wire schemas for every resource.
//!
//! Each resource comes with a singular envelope (`{"ticket": {...},
//! "included": {...}}`) used by get, create and update, and a collection
//! envelope (`{"tickets": [...], "included": {...}, "pagination": {...},
//! "meta": {...}}`) returned by list.

mod business_hour;
mod common;
mod company;
mod customer;
mod file;
mod help_doc;
mod inbox;
mod sla;
mod spamlist;
mod tag;
mod ticket;
mod ticket_meta;
mod user;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::pagination::Pagination;

pub use business_hour::BusinessHour;
pub use common::{BaseEntity, EntityRef, IncludedData, Meta};
pub use company::{Company, Domain};
pub use customer::{Contact, Customer};
pub use file::{Disposition, File, FileResponse, FileType, FilesResponse, UploadParams};
pub use help_doc::{HelpDocArticle, HelpDocSite};
pub use inbox::{Inbox, InboxMeta, InboxUser};
pub use sla::{
    Sla, SlaCompany, SlaConditionOption, SlaCustomer, SlaInbox, SlaNotification,
    SlaNotificationCondition, SlaNotificationType, SlaTag, SlaTicketPriority,
};
pub use spamlist::Spamlist;
pub use tag::Tag;
pub use ticket::{CustomFieldSearch, SearchTicketsFilter, Ticket};
pub use ticket_meta::{TicketPriority, TicketSource, TicketStatus, TicketType};
pub use user::User;

macro_rules! envelopes {
    ($($entity:ty => $single:ident($one:ident), $many:ident($all:ident);)*) => {
        $(
            #[serde_as]
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(default)]
            pub struct $single {
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub $one: $entity,
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub included: IncludedData,
            }

            impl From<$entity> for $single {
                fn from($one: $entity) -> Self {
                    Self {
                        $one,
                        included: IncludedData::default(),
                    }
                }
            }

            #[serde_as]
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(default)]
            pub struct $many {
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub $all: Vec<$entity>,
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub included: IncludedData,
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub pagination: Pagination,
                #[serde_as(deserialize_as = "DefaultOnNull")]
                pub meta: Meta,
            }
        )*
    };
}

envelopes! {
    BusinessHour => BusinessHourResponse(businesshour), BusinessHoursResponse(businesshours);
    Company => CompanyResponse(company), CompaniesResponse(companies);
    Customer => CustomerResponse(customer), CustomersResponse(customers);
    HelpDocArticle => HelpDocArticleResponse(helpdocarticle), HelpDocArticlesResponse(helpdocarticles);
    HelpDocSite => HelpDocSiteResponse(helpdocsite), HelpDocSitesResponse(helpdocsites);
    Inbox => InboxResponse(inbox), InboxesResponse(inboxes);
    Sla => SlaResponse(sla), SlasResponse(slas);
    Spamlist => SpamlistResponse(spamlist), SpamlistsResponse(spamlists);
    Tag => TagResponse(tag), TagsResponse(tags);
    Ticket => TicketResponse(ticket), TicketsResponse(tickets);
    TicketPriority => TicketPriorityResponse(ticketpriority), TicketPrioritiesResponse(ticketpriorities);
    TicketSource => TicketSourceResponse(ticketsource), TicketSourcesResponse(ticketsources);
    TicketStatus => TicketStatusResponse(ticketstatus), TicketStatusesResponse(ticketstatuses);
    TicketType => TicketTypeResponse(tickettype), TicketTypesResponse(tickettypes);
    User => UserResponse(user), UsersResponse(users);
}
