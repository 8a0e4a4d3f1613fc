//! Linear issue-tracker adapter: GraphQL client, query documents, and
//! response models.

pub mod client;
pub mod models;
pub mod queries;

pub use client::LinearClient;
