//! Applicant profile as returned by `GET /profiles/applicant/me`.

use serde::{Deserialize, Deserializer, Serialize};

/// A record from one of the profile list endpoints (education, experience,
/// certifications). Only presence matters for onboarding.
pub type ProfileRecord = serde_json::Value;

/// The applicant's own profile.
///
/// Every field is optional; the backend omits or nulls what the applicant
/// has not filled in yet. A field of the wrong JSON type reads as unset
/// rather than rejecting the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(alias = "first_name", deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name", deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub bio: Option<String>,
    #[serde(alias = "photo_url", deserialize_with = "lenient_string")]
    pub photo_url: Option<String>,
    #[serde(alias = "work_position", deserialize_with = "lenient_string")]
    pub work_position: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub skills: Vec<serde_json::Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// True when the field holds at least one character.
pub(crate) fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_camel_case_payload() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "gender": "female",
            "country": "UK",
            "photoUrl": "https://cdn.example.org/ada.png",
            "workPosition": "Analyst",
            "skills": ["math"]
        }))
        .unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.photo_url.as_deref(), Some("https://cdn.example.org/ada.png"));
        assert_eq!(profile.work_position.as_deref(), Some("Analyst"));
        assert_eq!(profile.skills.len(), 1);
        assert!(profile.city.is_none());
    }

    #[test]
    fn accepts_snake_case_aliases() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "work_position": "Admiral"
        }))
        .unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Grace"));
        assert_eq!(profile.last_name.as_deref(), Some("Hopper"));
        assert_eq!(profile.work_position.as_deref(), Some("Admiral"));
    }

    #[test]
    fn nulls_and_missing_fields_default() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "bio": null,
            "skills": null,
            "id": 17
        }))
        .unwrap();
        assert_eq!(profile, ApplicantProfile::default());
    }

    #[test]
    fn filled_rejects_empty_and_missing() {
        assert!(filled(&Some("x".to_string())));
        assert!(!filled(&Some(String::new())));
        assert!(!filled(&None));
    }

    #[test]
    fn mistyped_fields_do_not_reject_profile() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "gender": 1,
            "country": "UK",
            "city": ["London"],
            "bio": "Analyst",
            "skills": "python"
        }))
        .unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.country.as_deref(), Some("UK"));
        assert_eq!(profile.bio.as_deref(), Some("Analyst"));
        assert!(profile.gender.is_none());
        assert!(profile.city.is_none());
        assert!(profile.skills.is_empty());
    }
}
