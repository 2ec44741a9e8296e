//! Shared constants

/// Bytes per kibibyte
pub const BYTES_PER_KB: f64 = 1024.0;

/// Bytes per mebibyte
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Bytes per gibibyte
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bytes per tebibyte
pub const BYTES_PER_TB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;
