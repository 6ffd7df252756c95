//! Appointment client methods

use momcare_core::{Appointment, AppointmentStatus};
use reqwest::Method;

use super::AuthenticatedMomCareClient;
use crate::error::ClientError;
use crate::types::{AppointmentDecisionRequest, BookAppointmentRequest};

impl AuthenticatedMomCareClient {
    /// List the caller's appointments: a patient sees their bookings, a
    /// doctor the requests addressed to them
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        let request = self.request(Method::GET, "/appointments/");
        self.execute(request).await
    }

    /// Get a single appointment
    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, ClientError> {
        let request = self.request(Method::GET, &format!("/appointments/{id}/"));
        self.execute(request).await
    }

    /// Book an appointment with a doctor
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, ClientError> {
        let req = self.request(Method::POST, "/appointments/").json(&request);
        self.execute(req).await
    }

    /// Approve or decline a pending request (doctor role)
    pub async fn decide_appointment(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/appointments/{id}/"))
            .json(&AppointmentDecisionRequest { status });
        self.execute(req).await
    }

    /// Cancel an appointment
    pub async fn cancel_appointment(&self, id: i64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/appointments/{id}/"));
        self.execute_empty(request).await
    }
}
