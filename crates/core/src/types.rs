use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Account role, decides post-login routing on the screen side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

/// Profile of an authenticated account as the backend reports it.
///
/// The session layer treats everything here as opaque payload except `role`.
/// Doctor-only fields are absent for patients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<String>,
}

impl UserProfile {
    /// Name shown in navigation bars and greetings
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        if full.trim().is_empty() {
            self.username.clone()
        } else {
            full.trim().to_string()
        }
    }

    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }
}

/// A doctor available for booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<String>,
}

/// Lifecycle of an appointment request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Declined,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// An appointment between a patient and a doctor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Whether a doctor can still approve or decline this request
    pub fn is_actionable(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }
}

/// One bookable slot in a doctor's schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_profile_deserializes_without_doctor_fields() {
        let raw = r#"{
            "id": 7,
            "username": "amina",
            "email": "amina@example.com",
            "first_name": "Amina",
            "last_name": "Diallo",
            "role": "patient"
        }"#;
        let profile: UserProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.role, Role::Patient);
        assert!(profile.specialization.is_none());
        assert_eq!(profile.display_name(), "Amina Diallo");
    }

    #[test]
    fn appointment_status_uses_backend_spelling() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Approved).unwrap(),
            "\"approved\""
        );
        let status: AppointmentStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn appointment_without_status_defaults_to_pending() {
        let raw = r#"{
            "id": 1,
            "doctor_id": 2,
            "patient_id": 7,
            "date": "2025-03-14",
            "time": "09:30:00"
        }"#;
        let appointment: Appointment = serde_json::from_str(raw).unwrap();
        assert!(appointment.is_actionable());
    }
}
