//! API trait definitions split by responsibility
//!
//! - [`PolicyApi`] - Policy configuration CRUD
//! - [`GraphApi`] - Descriptor resolution and group listing
//!
//! The [`AzdoApi`](super::AzdoApi) super-trait combines both.

mod graph;
mod policy;

pub use graph::GraphApi;
pub use policy::PolicyApi;
