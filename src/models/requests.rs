use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::criteria::{MAX_AGE, MIN_AGE};
use crate::core::normalize::parse_list;
use crate::models::{GiftCriteria, UserProfile};

/// Raw query parameters of the suggestion endpoint.
///
/// Everything arrives as optional strings straight from the finder form.
/// `into_profile` is the normalization boundary: it parses the age
/// leniently and never fails; garbage degrades to "not provided".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub national: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

impl SuggestQuery {
    /// Convert raw parameters into a normalized profile.
    ///
    /// A non-numeric age, or one outside 1-120, becomes absent rather
    /// than an error; the matcher's age predicate then treats it as
    /// unable to satisfy any constrained range.
    pub fn into_profile(self) -> UserProfile {
        let age = self
            .age
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<u8>().ok())
            .filter(|age| (MIN_AGE..=MAX_AGE).contains(age));

        UserProfile {
            sex: self.sex.unwrap_or_default(),
            age,
            nationality: self.national.unwrap_or_default(),
            job: self.job.unwrap_or_default(),
        }
    }
}

/// Body of the admin create-gift endpoint.
///
/// Mirrors the original admin form: the list constraints come in as
/// comma-separated strings and go through `parse_list` before they are
/// stored, so the catalog only ever holds normalized criteria.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGiftRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "gender", alias = "genders", default)]
    pub genders: Option<String>,
    #[validate(range(min = 1, max = 120))]
    #[serde(rename = "ageMin", default)]
    pub age_min: Option<u8>,
    #[validate(range(min = 1, max = 120))]
    #[serde(rename = "ageMax", default)]
    pub age_max: Option<u8>,
    #[serde(default)]
    pub nationalities: Option<String>,
    #[serde(default)]
    pub jobs: Option<String>,
}

impl CreateGiftRequest {
    /// Build the gift's criteria from the raw form fields.
    pub fn criteria(&self) -> GiftCriteria {
        GiftCriteria {
            genders: self.genders.as_deref().map(parse_list).unwrap_or_default(),
            age_min: self.age_min,
            age_max: self.age_max,
            nationalities: self
                .nationalities
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            jobs: self.jobs.as_deref().map(parse_list).unwrap_or_default(),
        }
    }
}

/// Body of the signup endpoint. The original form enforces three-character
/// minimums, so the API does too.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(length(min = 3))]
    pub password: String,
}

/// Body of the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sex: &str, age: &str, national: &str, job: &str) -> SuggestQuery {
        SuggestQuery {
            sex: Some(sex.to_string()),
            age: Some(age.to_string()),
            national: Some(national.to_string()),
            job: Some(job.to_string()),
        }
    }

    #[test]
    fn test_into_profile_parses_valid_age() {
        let profile = query("female", "30", "American", "Engineer").into_profile();

        assert_eq!(profile.sex, "female");
        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.nationality, "American");
        assert_eq!(profile.job, "Engineer");
    }

    #[test]
    fn test_into_profile_coerces_bad_age_to_absent() {
        assert_eq!(query("", "abc", "", "").into_profile().age, None);
        assert_eq!(query("", "", "", "").into_profile().age, None);
        assert_eq!(query("", "-5", "", "").into_profile().age, None);
        assert_eq!(query("", "30.5", "", "").into_profile().age, None);
        assert_eq!(query("", "0", "", "").into_profile().age, None);
        assert_eq!(query("", "121", "", "").into_profile().age, None);
        assert_eq!(query("", "999", "", "").into_profile().age, None);
    }

    #[test]
    fn test_into_profile_trims_age() {
        assert_eq!(query("", " 25 ", "", "").into_profile().age, Some(25));
    }

    #[test]
    fn test_into_profile_missing_params() {
        let profile = SuggestQuery {
            sex: None,
            age: None,
            national: None,
            job: None,
        }
        .into_profile();

        assert!(profile.sex.is_empty());
        assert!(profile.age.is_none());
        assert!(profile.nationality.is_empty());
        assert!(profile.job.is_empty());
    }

    #[test]
    fn test_create_gift_criteria_parses_lists() {
        let req = CreateGiftRequest {
            name: "mug".to_string(),
            description: "ceramic".to_string(),
            price: 10.0,
            image_url: None,
            genders: Some("Male, Female".to_string()),
            age_min: Some(18),
            age_max: Some(25),
            nationalities: Some(" Japanese ,american,".to_string()),
            jobs: None,
        };

        let criteria = req.criteria();

        assert_eq!(criteria.genders, vec!["male", "female"]);
        assert_eq!(criteria.age_min, Some(18));
        assert_eq!(criteria.age_max, Some(25));
        assert_eq!(criteria.nationalities, vec!["japanese", "american"]);
        assert!(criteria.jobs.is_empty());
    }

    #[test]
    fn test_create_gift_accepts_gender_field_name() {
        let json = serde_json::json!({
            "name": "mug",
            "description": "ceramic",
            "price": 10.0,
            "gender": "female"
        });

        let req: CreateGiftRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.criteria().genders, vec!["female"]);
    }
}
