//! Outbound adapters (driven side).

pub mod extract;
pub mod feed;
pub mod http;
pub mod page;
