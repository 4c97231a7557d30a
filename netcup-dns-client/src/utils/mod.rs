//! Utility modules.

/// Date/time parsing helpers for the service's text timestamps.
pub mod datetime;

/// Log sanitization utilities to prevent credential exposure.
pub(crate) mod log_sanitizer;

/// Lenient serde helpers for scalars that arrive as text or native values.
pub(crate) mod wire;
