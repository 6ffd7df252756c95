//! Doctor directory client methods

use chrono::NaiveDate;
use momcare_core::{AvailabilitySlot, Doctor};
use reqwest::Method;

use super::AuthenticatedMomCareClient;
use crate::error::ClientError;

impl AuthenticatedMomCareClient {
    /// List doctors available for booking
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, ClientError> {
        let request = self.request(Method::GET, "/doctors/");
        self.execute(request).await
    }

    /// Get a single doctor
    pub async fn get_doctor(&self, id: i64) -> Result<Doctor, ClientError> {
        let request = self.request(Method::GET, &format!("/doctors/{id}/"));
        self.execute(request).await
    }

    /// Get a doctor's slots for a given date
    pub async fn doctor_availability(
        &self,
        id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/doctors/{id}/availability/"))
            .query(&[("date", date.to_string())]);
        self.execute(request).await
    }
}
