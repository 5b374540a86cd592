use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Demographic facts supplied by the gift-seeking user.
///
/// Every field is optional in practice: empty strings and `None` mean "not
/// provided". The request boundary normalizes raw query parameters into
/// this shape (in particular, a non-numeric or out-of-range age becomes
/// `None`) so the matcher never sees invalid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(rename = "national", default)]
    pub nationality: String,
    #[serde(default)]
    pub job: String,
}

/// Eligibility constraints embedded in a gift.
///
/// Every dimension is optional; an absent or empty dimension matches every
/// profile. Set members are stored as entered by the admin and normalized
/// (trimmed, lowercased) at match time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftCriteria {
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(rename = "ageMin", default)]
    pub age_min: Option<u8>,
    #[serde(rename = "ageMax", default)]
    pub age_max: Option<u8>,
    #[serde(default)]
    pub nationalities: Vec<String>,
    #[serde(default)]
    pub jobs: Vec<String>,
}

/// A catalog entry. The matcher treats gifts as read-only input; they are
/// created and deleted through the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gift {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub criteria: GiftCriteria,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A store-owner account. Never serialized to the API; the password hash
/// and salt stay inside the service layer.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_deserialize_defaults_to_unconstrained() {
        let criteria: GiftCriteria = serde_json::from_str("{}").unwrap();

        assert!(criteria.genders.is_empty());
        assert!(criteria.age_min.is_none());
        assert!(criteria.age_max.is_none());
        assert!(criteria.nationalities.is_empty());
        assert!(criteria.jobs.is_empty());
    }

    #[test]
    fn test_gift_wire_shape_is_flat() {
        let json = serde_json::json!({
            "id": "3fa4a3f0-5e2a-4d8f-9d6a-6f7b3f1c2d10",
            "name": "sake set",
            "description": "A ceramic set",
            "price": 42.5,
            "nationalities": ["Japanese"],
            "ageMin": 20
        });

        let gift: Gift = serde_json::from_value(json).unwrap();

        assert_eq!(gift.name, "sake set");
        assert_eq!(gift.criteria.nationalities, vec!["Japanese"]);
        assert_eq!(gift.criteria.age_min, Some(20));
        assert!(gift.criteria.age_max.is_none());
        assert!(gift.image.is_none());
    }
}
