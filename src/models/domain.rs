use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Maximum bio length, enforced by input truncation
pub const BIO_MAX_CHARS: usize = 500;

/// Profile data as the user typed it, pending submission
///
/// Every field holds raw input so that a rejected submission can be shown
/// back exactly as entered. Rules live in `core::validation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileDraft {
    #[validate(custom(function = "crate::core::validation::required_name"))]
    #[serde(default)]
    pub name: String,
    #[validate(custom(function = "crate::core::validation::required_surname"))]
    #[serde(default, alias = "prenom")]
    pub surname: String,
    #[validate(custom(function = "crate::core::validation::adult_age"))]
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: String,
    #[validate(custom(function = "crate::core::validation::known_gender"))]
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub bio: String,
}

impl ProfileDraft {
    /// Apply one keystroke-level edit. The bio is capped at 500 characters.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Surname => self.surname = value.to_string(),
            Field::Age => self.age = value.to_string(),
            Field::Gender => self.gender = value.to_string(),
            Field::Bio => self.bio = truncate_bio(value),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Bio => &self.bio,
        }
    }

    /// Parsed gender, if the raw value is one of the options
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.parse().ok()
    }

    /// Parsed age, if the raw value is an integer
    pub fn parsed_age(&self) -> Option<u32> {
        self.age.trim().parse().ok()
    }

    /// Characters used, for the counter under the bio textarea
    pub fn bio_len(&self) -> usize {
        self.bio.chars().count()
    }
}

/// JSON clients send the age either as typed text or as a number
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

fn truncate_bio(value: &str) -> String {
    value.chars().take(BIO_MAX_CHARS).collect()
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Surname,
    Age,
    Gender,
    Bio,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Name, Field::Surname, Field::Age, Field::Gender, Field::Bio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Surname => "surname",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Bio => "bio",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "surname" | "prenom" => Ok(Field::Surname),
            "age" => Ok(Field::Age),
            "gender" => Ok(Field::Gender),
            "bio" => Ok(Field::Bio),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Gender options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            // "autre" is what older clients submit for the third option
            "other" | "autre" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {:?}", other)),
        }
    }
}

/// Candidate profile returned by the people directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProfile {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub city: String,
    pub country: String,
    pub age: u32,
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
}

impl MatchProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Generated avatar used when the photo fails to load
    pub fn fallback_photo_url(&self) -> String {
        format!(
            "https://ui-avatars.com/api/?name={}+{}&size=400&background=random&color=fff&format=png",
            urlencoding::encode(&self.first_name),
            urlencoding::encode(&self.last_name),
        )
    }

    /// Toast text for the card's "send message" button
    pub fn message_text(&self) -> String {
        message_for(&self.first_name)
    }
}

pub fn message_for(first_name: &str) -> String {
    format!("Message sent to {}! 💕", first_name)
}
