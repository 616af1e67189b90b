//! HTTP middleware.

pub mod access;
