//! Request context carrying the acting user and the request time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current request.
///
/// Built by the caller (CLI, an embedding HTTP layer) and passed into
/// state-changing service methods so that every write knows *who* is
/// acting and *when*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user, if any. Recorded as `created_by` on new rows.
    pub user_id: Option<Uuid>,
    /// When the request was received. Business rules use this as "now".
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for an authenticated user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            request_time: Utc::now(),
        }
    }

    /// Context for administrative tooling with no acting user.
    pub fn system() -> Self {
        Self {
            user_id: None,
            request_time: Utc::now(),
        }
    }

    /// Pin the request time.
    pub fn at(mut self, request_time: DateTime<Utc>) -> Self {
        self.request_time = request_time;
        self
    }
}
