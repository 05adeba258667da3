//! Car listing and creation.
//!
//! # Design
//! The two operations sit on opposite sides of the availability/correctness
//! split: the listing swallows every failure and renders empty (a broken
//! catalog page is worse than a bare one), while creation surfaces the
//! classified error so the submitting user sees what went wrong.

use log::warn;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::Car;

pub struct CarService {
    api: ApiClient,
}

impl CarService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every car the backend knows about. Any failure — transport, status,
    /// or a body that is not an array — yields an empty list.
    pub fn get_all(&self) -> Vec<Car> {
        match self.api.get::<Vec<Car>>("/cars") {
            Ok(cars) => cars,
            Err(err) => {
                warn!("car listing unavailable: {err}");
                Vec::new()
            }
        }
    }

    /// Registers a new car. Failures surface with the adapter's three-way
    /// classification: the server `message`, `Could not connect to server`,
    /// or a configuration-error message.
    pub fn create(&self, car: &Car) -> Result<Car, ApiError> {
        self.api.post("/cars", car)
    }
}
