//! Service catalog: resource-specific paths and payloads on top of the
//! connector port

pub mod people;
pub mod records;
pub mod security_model;

pub use people::PeopleService;
pub use records::RecordsService;
pub use security_model::SecurityModelService;
