//! Socket acceptance and per-connection dispatch.

pub mod listener;
