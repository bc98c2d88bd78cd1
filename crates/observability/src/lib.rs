//! Tracing/logging setup shared by humidor binaries.

/// Initialize process-wide observability (tracing/logging) in `format`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::LogFormat;
