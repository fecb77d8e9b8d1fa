//! Common utilities for the HTTP surface.

pub mod body;
