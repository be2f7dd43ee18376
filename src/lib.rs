//! profstore - continuous-profiling storage service
//!
//! Registers service builds, ingests pprof profiles submitted against a
//! service token, and exports matching profiles by service, type, time
//! range and labels.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
