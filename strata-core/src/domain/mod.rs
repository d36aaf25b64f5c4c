//! Platform resource types
//!
//! These structures mirror the remote service's schema. The platform owns
//! their lifecycle entirely: clients construct the initial request, every
//! later transition happens server-side.

pub mod common;
pub mod job;
pub mod pipeline;
