use std::env;

/// What to do with a history date filter that fails to parse. The legacy
/// behavior is to drop the filter; `Reject` turns it into a 400 instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterPolicy {
    Ignore,
    Reject,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub date_filter_policy: DateFilterPolicy,
}

impl AppConfig {
    /// Reads `INVALID_DATE_FILTER` (`ignore` | `reject`), defaulting to
    /// `ignore`. Anything else aborts startup rather than guessing.
    pub fn from_env() -> Self {
        let policy = match env::var("INVALID_DATE_FILTER").as_deref() {
            Ok("reject") => DateFilterPolicy::Reject,
            Ok("ignore") | Err(_) => DateFilterPolicy::Ignore,
            Ok(other) => panic!("INVALID_DATE_FILTER must be 'ignore' or 'reject', got {:?}", other),
        };
        Self {
            date_filter_policy: policy,
        }
    }
}
