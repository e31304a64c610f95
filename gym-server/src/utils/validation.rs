//! Input length limits
//!
//! SQLite TEXT has no built-in length enforcement, so the handlers and the
//! membership validators share these.

/// Member names, plan names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: mobile numbers, search terms
pub const MAX_SHORT_TEXT_LEN: usize = 100;
