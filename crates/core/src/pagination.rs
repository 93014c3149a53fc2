//! List pagination clamps shared by repositories.

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Hard upper bound on page size.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Clamp a requested limit into `[1, max]`, defaulting when absent or
/// non-positive.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(max),
        _ => default,
    }
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
