//! Dependency snapshot pipeline: the immutable model, the ordered filter
//! chain, and the services that turn raw inputs into dependency models.

pub mod domain;
pub mod filters;
pub mod services;
