//! Property discovery for a deed marketplace
//!
//! The core is [`discovery::discover`]: a pure pipeline that filters,
//! scores, sorts and paginates property listings for one user. Listings
//! and share holdings come from the async stores in [`stores`].

pub mod cli;
pub mod discovery;
pub mod error;
pub mod models;
pub mod stores;

pub use discovery::{discover, DiscoveryEngine, DiscoveryPage, FilterCriteria};
pub use error::DiscoveryError;
pub use models::{PropertyRecord, UserShareMap};
