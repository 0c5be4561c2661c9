use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The single user profile record used for structured autofill.
///
/// Every attribute is optional on the wire. Absent or `null` attributes
/// deserialize to an empty string and are treated as "no value"; numbers and
/// booleans keep their text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_string")]
    pub dob: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_string")]
    pub github: String,
    #[serde(deserialize_with = "lenient_string")]
    pub short_bio: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// A profile attribute a form control can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileAttribute {
    Email,
    FirstName,
    LastName,
    FullName,
    Phone,
    Address,
    City,
    State,
    Zip,
    Company,
    Role,
    Linkedin,
    Github,
    Gender,
    ShortBio,
    BirthDay,
    BirthMonth,
    BirthYear,
}

impl Profile {
    /// Returns the stored value for a plain (non-derived) attribute.
    /// Derived attributes (full name, date-of-birth parts) are resolved by the classifier.
    pub fn value_of(&self, attribute: ProfileAttribute) -> &str {
        match attribute {
            ProfileAttribute::Email => &self.email,
            ProfileAttribute::FirstName => &self.first_name,
            ProfileAttribute::LastName => &self.last_name,
            ProfileAttribute::Phone => &self.phone,
            ProfileAttribute::Address => &self.address,
            ProfileAttribute::City => &self.city,
            ProfileAttribute::State => &self.state,
            ProfileAttribute::Zip => &self.zip,
            ProfileAttribute::Company => &self.company,
            ProfileAttribute::Role => &self.role,
            ProfileAttribute::Linkedin => &self.linkedin,
            ProfileAttribute::Github => &self.github,
            ProfileAttribute::Gender => &self.gender,
            ProfileAttribute::ShortBio => &self.short_bio,
            ProfileAttribute::FullName
            | ProfileAttribute::BirthDay
            | ProfileAttribute::BirthMonth
            | ProfileAttribute::BirthYear => "",
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Copy of the profile with every attribute trimmed, as saved from the settings surface.
    pub fn trimmed(&self) -> Self {
        let t = |s: &str| s.trim().to_string();
        Self {
            first_name: t(&self.first_name),
            last_name: t(&self.last_name),
            gender: t(&self.gender),
            dob: t(&self.dob),
            email: t(&self.email),
            phone: t(&self.phone),
            address: t(&self.address),
            city: t(&self.city),
            state: t(&self.state),
            zip: t(&self.zip),
            company: t(&self.company),
            role: t(&self.role),
            linkedin: t(&self.linkedin),
            github: t(&self.github),
            short_bio: t(&self.short_bio),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Pretty JSON rendering embedded into generation prompts.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
