//! Strata Core
//!
//! Core types for the Strata managed ML platform API.
//!
//! This crate contains:
//! - Domain types: Platform resources (BatchPredictionJob, TrainingPipeline)
//! - DTOs: Request and response bodies for the platform REST API
//! - Resource name helpers for the path-style identifiers the API uses

pub mod domain;
pub mod dto;
pub mod name;
