//! Configuration sources, binding, and the registered property holders.

pub mod binder;
pub mod config;
pub mod properties;
pub mod registration;
pub mod source;
