//! Container runtime invocation and typed lifecycle operations for graceprobe.
//!
//! [`backend`] speaks to the container runtime one command at a time;
//! [`container::ContainerController`] turns raw outcomes into typed results.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod container;
pub mod exec;
pub mod state;
