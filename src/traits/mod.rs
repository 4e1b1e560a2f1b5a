//! Resource operation contracts.
//!
//! Every resource service implements the operations its endpoints support,
//! so code can be written once against the contract rather than per
//! resource.

mod create;
mod get;
mod list;
mod update;

pub use create::Create;
pub use get::Get;
pub use list::List;
pub use update::Update;
