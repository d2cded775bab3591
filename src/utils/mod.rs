// Utilities
pub mod backup;
pub mod clipboard;
pub mod error;
pub mod formatter;
