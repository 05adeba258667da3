//! Per-user reservation history.
//!
//! # Design
//! The backend has no per-user query, so history fetches the whole
//! `/reservations` list and filters client-side. Record `userId` fields are
//! already coerced to canonical strings at deserialization, so `1` and `"1"`
//! compare equal here — older records carry numeric ids and must keep
//! matching. Unlike the car listing, a failed fetch propagates: an empty
//! history and an unavailable history mean different things to the user.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::Reservation;

pub struct HistoryService {
    api: ApiClient,
}

impl HistoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Reservations belonging to `user_id`. A missing or empty id yields an
    /// empty list without issuing a request.
    pub fn for_user(&self, user_id: Option<&str>) -> Result<Vec<Reservation>, ApiError> {
        let wanted = match user_id {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(Vec::new()),
        };
        let all: Vec<Reservation> = self.api.get("/reservations")?;
        Ok(all.into_iter().filter(|r| r.user_id == wanted).collect())
    }
}
