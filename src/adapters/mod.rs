//! Adapters - implementations of the ports and the HTTP surface.

pub mod http;
pub mod pprof;
pub mod storage;
