//! Per-resource services.
//!
//! Every resource is a [`Service`] bound to its envelope types and path.
//! The client hands them out cheaply; each shares the client's pipeline.

mod files;
mod tickets;

use crate::client::DeskClient;
use crate::models::*;
use crate::path::PathHandler;
use crate::service::Service;

macro_rules! resources {
    ($($(#[$doc:meta])* $accessor:ident => $alias:ident<$single:ty, $many:ty> = $paths:expr;)*) => {
        $(
            pub type $alias = Service<$single, $many>;
        )*

        impl DeskClient {
            $(
                $(#[$doc])*
                pub fn $accessor(&self) -> $alias {
                    Service::new(self.clone(), $paths)
                }
            )*
        }
    };
}

resources! {
    business_hours => BusinessHourService<BusinessHourResponse, BusinessHoursResponse>
        = PathHandler::new("businesshours");
    companies => CompanyService<CompanyResponse, CompaniesResponse>
        = PathHandler::new("companies");
    customers => CustomerService<CustomerResponse, CustomersResponse>
        = PathHandler::new("customers");
    /// File references. Creation goes to `files/ref` and answers with an
    /// upload descriptor; see [`FileService::upload`].
    files => FileService<FileResponse, FilesResponse>
        = PathHandler::new("files").with_create("files/ref");
    help_doc_articles => HelpDocArticleService<HelpDocArticleResponse, HelpDocArticlesResponse>
        = PathHandler::new("helpdocarticles");
    help_doc_sites => HelpDocSiteService<HelpDocSiteResponse, HelpDocSitesResponse>
        = PathHandler::new("helpdocsites");
    inboxes => InboxService<InboxResponse, InboxesResponse>
        = PathHandler::new("inboxes");
    slas => SlaService<SlaResponse, SlasResponse>
        = PathHandler::new("slas");
    spamlists => SpamlistService<SpamlistResponse, SpamlistsResponse>
        = PathHandler::new("spamlists");
    tags => TagService<TagResponse, TagsResponse>
        = PathHandler::new("tags");
    ticket_priorities => TicketPriorityService<TicketPriorityResponse, TicketPrioritiesResponse>
        = PathHandler::new("ticketpriorities");
    /// Tickets, including [`TicketService::search`].
    tickets => TicketService<TicketResponse, TicketsResponse>
        = PathHandler::new("tickets");
    ticket_sources => TicketSourceService<TicketSourceResponse, TicketSourcesResponse>
        = PathHandler::new("ticketsources");
    ticket_statuses => TicketStatusService<TicketStatusResponse, TicketStatusesResponse>
        = PathHandler::new("ticketstatuses");
    ticket_types => TicketTypeService<TicketTypeResponse, TicketTypesResponse>
        = PathHandler::new("tickettypes");
    users => UserService<UserResponse, UsersResponse>
        = PathHandler::new("users");
}
