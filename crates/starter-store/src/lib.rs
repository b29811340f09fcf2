//! Storage layer: object store backends (local directory, S3), employee catalog
//! loading, and presigned configuration listings.

mod error;
pub use error::StoreError;

pub mod catalog;
pub mod listing;
mod local;
mod object;

pub use catalog::{catalog_key, download_probabilities, parse_catalog};
pub use listing::{ConfigurationListing, Resource, list_configurations};
pub use local::LocalStore;
pub use object::{ObjectInfo, ObjectStore};

#[cfg(feature = "s3")]
mod s3;
#[cfg(feature = "s3")]
pub use s3::S3Store;
