//! # Risk API Client
//!
//! Typed access to the external risk API, demo-aware:
//!
//! - [`ApiGateway`] - one method per endpoint; demo sessions get fixtures
//!   without any network I/O
//! - [`fixtures`] - the demo dataset
//! - [`Loadable`] - loading/data pair for views

pub mod fixtures;
pub mod gateway;
pub mod loadable;

pub use gateway::ApiGateway;
pub use loadable::Loadable;
