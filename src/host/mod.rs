//! Host-facing command contract and stdio bridge for front-end integration.

pub mod channel;
pub mod contract;
pub mod stdio;
