//! Utility modules: configuration, message catalogue, logging

pub mod config;
pub mod i18n;
pub mod logger;
