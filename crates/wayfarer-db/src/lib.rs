//! Wayfarer document store
//!
//! Repositories for the data access layer. The backing store is an abstract
//! document collection held in memory with optional JSON-file persistence;
//! each repository owns one collection and provides the find/create/update/
//! count operations the handlers consume.

mod packages;
mod posts;
pub mod seed;
mod store;
mod users;

pub use packages::{PackageFilter, PackageRepository};
pub use posts::PostRepository;
pub use store::{DataSet, DocumentStore};
pub use users::UserRepository;
