use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name/email/phone captured at signup by the auth flow. This service
/// only reads it; the elder's display name falls back to "Unknown" when
/// the record is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The elder-info form. Every field is optional except what the weekly
/// report needs to resolve a recipient, which is still optional here and
/// enforced at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// POST /elder-info body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveElderInfoRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 1, max = 130, message = "Age must be a plausible value"))]
    pub age: Option<u16>,

    pub blood_group: Option<String>,

    #[validate(length(max = 2000, message = "Medications must be under 2000 characters"))]
    pub medications: Option<String>,

    #[validate(length(max = 100, message = "Guardian name must be under 100 characters"))]
    pub guardian_name: Option<String>,

    #[validate(email(message = "Invalid guardian email format"))]
    pub guardian_email: Option<String>,
}

impl SaveElderInfoRequest {
    pub fn into_profile(self, updated_at: DateTime<Utc>) -> ElderProfile {
        ElderProfile {
            name: self.name,
            age: self.age,
            blood_group: self.blood_group,
            medications: self.medications,
            guardian_name: self.guardian_name,
            guardian_email: self.guardian_email,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardian_email_is_validated() {
        let request = SaveElderInfoRequest {
            name: Some("Margaret".into()),
            age: Some(72),
            blood_group: None,
            medications: None,
            guardian_name: Some("Rose".into()),
            guardian_email: Some("not-an-email".into()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_profile_without_guardian_is_valid() {
        let request = SaveElderInfoRequest {
            name: Some("Margaret".into()),
            age: None,
            blood_group: None,
            medications: None,
            guardian_name: None,
            guardian_email: None,
        };
        assert!(request.validate().is_ok());
    }
}
