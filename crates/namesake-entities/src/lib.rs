//! namesake-entities - Entity storage and resolution facade
//!
//! Builds on namesake-core:
//!
//! - **Profile**: an entity's primary name, alternate names, attributes and relationships
//! - **Repository**: profile storage indexed by normalized and phonetic name keys
//! - **Facade**: string comparison reports, list matching, entity registration and lookup by name

pub mod facade;
pub mod profile;
pub mod report;
pub mod repository;

pub use facade::EntityResolutionFacade;
pub use profile::EntityProfile;
pub use report::{
    ComparisonReport, ListMatch, PhoneticSummary, ProcessedPair, EXACT_MATCH,
    EXACT_PROCESSED_MATCH,
};
pub use repository::{EntityRepository, InMemoryEntityRepository};
