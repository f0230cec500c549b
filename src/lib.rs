pub mod core;
pub mod registry;
pub mod gate;
pub mod permissions;

// Configuration and process hosting
pub mod config;
pub mod service;

// Optional components
pub mod logging;
