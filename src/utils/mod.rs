//! Shared helpers for Arrow access

pub mod arrow;
