//! Azure DevOps API client

pub mod api;
pub mod azdo;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{GraphApi, PolicyApi};
pub use azdo::AzdoClient;
#[cfg(test)]
pub use mock::MockAzdoClient;
