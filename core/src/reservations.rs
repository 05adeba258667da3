//! Reservation CRUD. Thin pass-through to the `/reservations` resource;
//! errors propagate untouched.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::Reservation;

pub struct ReservationService {
    api: ApiClient,
}

impl ReservationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn create(&self, reservation: &Reservation) -> Result<Reservation, ApiError> {
        self.api.post("/reservations", reservation)
    }

    pub fn get_all(&self) -> Result<Vec<Reservation>, ApiError> {
        self.api.get("/reservations")
    }

    pub fn get_by_id(&self, id: &str) -> Result<Reservation, ApiError> {
        self.api.get(&format!("/reservations/{id}"))
    }

    pub fn update(&self, id: &str, reservation: &Reservation) -> Result<Reservation, ApiError> {
        self.api.put(&format!("/reservations/{id}"), reservation)
    }
}
