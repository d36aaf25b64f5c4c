//! Request and response bodies for the platform REST API
//!
//! These are the structures a caller builds before a call and the envelopes
//! the API wraps list results in. Single resources come back as the domain
//! types directly.

pub mod job;
pub mod pipeline;
