//! API-wide constants.

/// Prefix for all admin API routes.
pub const API_PREFIX: &str = "/api/admin";

/// Path segment that means "start a blank draft" rather than a stored slug.
pub const NEW_DRAFT_SLUG: &str = "new";
