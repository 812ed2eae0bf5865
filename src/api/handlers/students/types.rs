//! Student record DTOs. Wire field names keep the API contract of the
//! deployed frontend (`nis`, `nama`, `jenis_kelamin`, ...).

use crate::api::handlers::valid_email;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(ToSchema, Deserialize, Debug)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub nis: String,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "jenis_kelamin", default)]
    pub gender: String,
    #[serde(rename = "tempat_lahir", default)]
    pub birth_place: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "tanggal_lahir", default)]
    pub birth_date: String,
    #[serde(rename = "alamat", default)]
    pub address: String,
    #[serde(rename = "no_telepon", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "kelas", default)]
    pub class: String,
    #[serde(rename = "tahun_masuk", default)]
    pub enrollment_year: i32,
}

impl CreateStudentRequest {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.nis.trim().is_empty() {
            errors.push("nis is required".to_string());
        }

        if self.name.trim().is_empty() {
            errors.push("nama is required".to_string());
        }

        if !matches!(self.gender.as_str(), "L" | "P") {
            errors.push("jenis_kelamin must be one of: L, P".to_string());
        }

        if !self.email.trim().is_empty() && !valid_email(self.email.trim()) {
            errors.push("email must be a valid email address".to_string());
        }

        errors
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(ToSchema, Deserialize, Debug)]
pub struct UpdateStudentRequest {
    pub nis: Option<String>,
    #[serde(rename = "nama")]
    pub name: Option<String>,
    #[serde(rename = "jenis_kelamin")]
    pub gender: Option<String>,
    #[serde(rename = "tempat_lahir")]
    pub birth_place: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "tanggal_lahir")]
    pub birth_date: Option<String>,
    #[serde(rename = "alamat")]
    pub address: Option<String>,
    #[serde(rename = "no_telepon")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "kelas")]
    pub class: Option<String>,
    #[serde(rename = "tahun_masuk")]
    pub enrollment_year: Option<i32>,
}

impl UpdateStudentRequest {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(gender) = &self.gender {
            if !matches!(gender.as_str(), "L" | "P") {
                errors.push("jenis_kelamin must be one of: L, P".to_string());
            }
        }

        if let Some(email) = &self.email {
            if !email.trim().is_empty() && !valid_email(email.trim()) {
                errors.push("email must be a valid email address".to_string());
            }
        }

        errors
    }
}

#[derive(Deserialize, IntoParams, Debug)]
pub struct ListStudentsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct StudentResponse {
    pub id: i64,
    pub nis: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "jenis_kelamin")]
    pub gender: String,
    #[serde(rename = "tempat_lahir")]
    pub birth_place: String,
    #[serde(rename = "tanggal_lahir")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "no_telepon")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "kelas")]
    pub class: String,
    #[serde(rename = "tahun_masuk")]
    pub enrollment_year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parse an optional `YYYY-MM-DD` birth date; empty input means none.
pub fn parse_birth_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT)
        .map(Some)
        .map_err(|_| "tanggal_lahir must use the YYYY-MM-DD format".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "nis": "12345",
            "nama": "Budi",
            "jenis_kelamin": "L",
        }))
        .unwrap()
    }

    #[test]
    fn test_wire_field_names() {
        let request: CreateStudentRequest = serde_json::from_value(serde_json::json!({
            "nis": "12345",
            "nama": "Budi",
            "jenis_kelamin": "L",
            "tempat_lahir": "Bandung",
            "tanggal_lahir": "2008-01-31",
            "kelas": "7A",
            "tahun_masuk": 2020,
        }))
        .unwrap();

        assert_eq!(request.name, "Budi");
        assert_eq!(request.gender, "L");
        assert_eq!(request.birth_place, "Bandung");
        assert_eq!(request.class, "7A");
        assert_eq!(request.enrollment_year, 2020);
    }

    #[test]
    fn test_create_validation() {
        assert!(create_request().validate().is_empty());

        let mut request = create_request();
        request.gender = "X".to_string();
        assert_eq!(
            request.validate(),
            vec!["jenis_kelamin must be one of: L, P"]
        );

        let mut request = create_request();
        request.email = "not-an-email".to_string();
        assert_eq!(
            request.validate(),
            vec!["email must be a valid email address"]
        );
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date(""), Ok(None));
        assert_eq!(
            parse_birth_date("2008-01-31"),
            Ok(Some(NaiveDate::from_ymd_opt(2008, 1, 31).unwrap()))
        );
        assert!(parse_birth_date("31-01-2008").is_err());
        assert!(parse_birth_date("2008-13-01").is_err());
    }
}
