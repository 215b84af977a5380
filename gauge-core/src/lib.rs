//! Gauge Core
//!
//! Core types for the Gauge evaluation orchestrator.
//!
//! This crate contains:
//! - Domain types: Core business entities (JobRecord, RunStatus, RunReport)
//! - DTOs: Descriptor and wire types exchanged with the evaluation provider

pub mod domain;
pub mod dto;
