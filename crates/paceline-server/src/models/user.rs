//! User account rows and the payloads that touch them.

use paceline_db::{DbError, DbResult, FromRow, RowExt, validate};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use super::rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Preference {
    Cardio,
    Weight,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cardio => "CARDIO",
            Self::Weight => "WEIGHT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CARDIO" => Some(Self::Cardio),
            "WEIGHT" => Some(Self::Weight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "KG",
            Self::Lbs => "LBS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "KG" => Some(Self::Kg),
            "LBS" => Some(Self::Lbs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeightUnit {
    Cm,
    Inch,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cm => "CM",
            Self::Inch => "INCH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CM" => Some(Self::Cm),
            "INCH" => Some(Self::Inch),
            _ => None,
        }
    }
}

/// A row in `users`. Profile columns stay NULL until the owner fills
/// them in through `PATCH /v1/user`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub preference: Option<Preference>,
    pub weight_unit: Option<WeightUnit>,
    pub height_unit: Option<HeightUnit>,
    pub weight: Option<i32>,
    pub height: Option<i32>,
    pub name: Option<String>,
    pub image_uri: Option<String>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            email: row.try_get_column("email")?,
            password_hash: row.try_get_column("password_hash")?,
            preference: parse_nullable(row, "preference", Preference::parse)?,
            weight_unit: parse_nullable(row, "weight_unit", WeightUnit::parse)?,
            height_unit: parse_nullable(row, "height_unit", HeightUnit::parse)?,
            weight: row.try_get_column("weight")?,
            height: row.try_get_column("height")?,
            name: row.try_get_column("name")?,
            image_uri: row.try_get_column("image_uri")?,
        })
    }
}

fn parse_nullable<T>(
    row: &Row,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> DbResult<Option<T>> {
    match row.try_get_column::<Option<String>>(column)? {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| DbError::decode(column, format!("unexpected value {raw:?}"))),
    }
}

/// `GET /v1/user` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub preference: Option<Preference>,
    pub weight_unit: Option<WeightUnit>,
    pub height_unit: Option<HeightUnit>,
    pub weight: Option<i32>,
    pub height: Option<i32>,
    pub email: String,
    pub name: Option<String>,
    pub image_uri: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            preference: user.preference,
            weight_unit: user.weight_unit,
            height_unit: user.height_unit,
            weight: user.weight,
            height: user.height,
            email: user.email,
            name: user.name,
            image_uri: user.image_uri,
        }
    }
}

/// `PATCH /v1/user` body. Same shape minus the email.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfile {
    pub preference: Option<Preference>,
    pub weight_unit: Option<WeightUnit>,
    pub height_unit: Option<HeightUnit>,
    pub weight: Option<i32>,
    pub height: Option<i32>,
    pub name: Option<String>,
    pub image_uri: Option<String>,
}

impl From<User> for UpdatedProfile {
    fn from(user: User) -> Self {
        Self {
            preference: user.preference,
            weight_unit: user.weight_unit,
            height_unit: user.height_unit,
            weight: user.weight,
            height: user.height,
            name: user.name,
            image_uri: user.image_uri,
        }
    }
}

/// Register and login take the same two fields under the same rules.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), String> {
        rule("email", validate::is_email(&self.email))?;
        let len = self.password.chars().count();
        rule("password", (8..=32).contains(&len))
    }
}

/// Partial profile update. Absent fields leave the column untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub preference: Option<Preference>,
    pub weight_unit: Option<WeightUnit>,
    pub height_unit: Option<HeightUnit>,
    pub weight: Option<i32>,
    pub height: Option<i32>,
    pub name: Option<String>,
    pub image_uri: Option<String>,
}

impl UpdateUserPayload {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(weight) = self.weight {
            rule("weight", (10..=1000).contains(&weight))?;
        }
        if let Some(height) = self.height {
            rule("height", (3..=250).contains(&height))?;
        }
        if let Some(name) = &self.name {
            let len = name.chars().count();
            rule("name", (2..=60).contains(&len))?;
        }
        if let Some(uri) = &self.image_uri {
            rule("imageUri", validate::is_uri_with_host(uri))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_a_real_email() {
        let creds = Credentials {
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
        };
        assert_eq!(creds.validate().unwrap_err(), "validation for 'email' failed");
    }

    #[test]
    fn password_length_is_bounded() {
        let short = Credentials {
            email: "a@b.co".to_string(),
            password: "seven77".to_string(),
        };
        assert!(short.validate().is_err());

        let long = Credentials {
            email: "a@b.co".to_string(),
            password: "x".repeat(33),
        };
        assert!(long.validate().is_err());

        let ok = Credentials {
            email: "a@b.co".to_string(),
            password: "x".repeat(32),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn empty_update_payload_is_valid() {
        assert!(UpdateUserPayload::default().validate().is_ok());
    }

    #[test]
    fn weight_and_height_bounds() {
        let mut payload = UpdateUserPayload {
            weight: Some(9),
            ..Default::default()
        };
        assert_eq!(payload.validate().unwrap_err(), "validation for 'weight' failed");

        payload.weight = Some(10);
        payload.height = Some(251);
        assert_eq!(payload.validate().unwrap_err(), "validation for 'height' failed");

        payload.height = Some(250);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn name_length_and_image_uri_host() {
        let payload = UpdateUserPayload {
            name: Some("a".to_string()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());

        let payload = UpdateUserPayload {
            image_uri: Some("not a uri".to_string()),
            ..Default::default()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            "validation for 'imageUri' failed"
        );

        let payload = UpdateUserPayload {
            name: Some("Mia Tan".to_string()),
            image_uri: Some("https://cdn.example.com/avatar.png".to_string()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_fields_arrive_in_camel_case() {
        let payload: UpdateUserPayload = serde_json::from_value(serde_json::json!({
            "weightUnit": "KG",
            "heightUnit": "CM",
            "imageUri": "https://cdn.example.com/a.png",
        }))
        .unwrap();
        assert_eq!(payload.weight_unit, Some(WeightUnit::Kg));
        assert_eq!(payload.height_unit, Some(HeightUnit::Cm));
        assert!(payload.image_uri.is_some());
    }

    #[test]
    fn unknown_preference_is_a_deserialize_error() {
        let res: Result<UpdateUserPayload, _> =
            serde_json::from_value(serde_json::json!({ "preference": "BULK" }));
        assert!(res.is_err());
    }

    #[test]
    fn profile_serializes_with_email_and_updated_profile_without() {
        let user = User {
            id: Uuid::new_v4(),
            email: "runner@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            preference: Some(Preference::Cardio),
            weight_unit: None,
            height_unit: None,
            weight: Some(70),
            height: None,
            name: None,
            image_uri: None,
        };

        let profile = serde_json::to_value(UserProfile::from(user.clone())).unwrap();
        assert_eq!(profile["email"], "runner@example.com");
        assert_eq!(profile["preference"], "CARDIO");
        assert_eq!(profile["weightUnit"], serde_json::Value::Null);

        let updated = serde_json::to_value(UpdatedProfile::from(user)).unwrap();
        assert!(updated.get("email").is_none());
        assert_eq!(updated["weight"], 70);
    }
}
