//! # Postboard Core
//!
//! The domain layer of Postboard.
//! This crate holds the post model, pagination types, the repository port and
//! the post service. It has no storage dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
