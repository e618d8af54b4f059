//! Application-wide constants.

/// Category assigned to a quote when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "general";

/// Maximum number of records requested from the remote source per fetch.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Default interval between scheduled reconciliation runs, in seconds.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

/// Settings key for the category filter the user last selected.
pub const SETTING_LAST_FILTER: &str = "last_filter";

/// Settings key for the identity key of the quote last shown to the user.
pub const SETTING_LAST_VIEWED: &str = "last_viewed";
