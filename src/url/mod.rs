//! URL handling module for Grantscout
//!
//! This module provides href resolution against a base page URL and the
//! domain-scope check that bounds the crawl to the seed's network location.
//! Both are pure functions; dropping a link on failure is the caller's job.

mod resolve;
mod scope;

pub use resolve::resolve_href;
pub use scope::{host_scope, in_scope};
