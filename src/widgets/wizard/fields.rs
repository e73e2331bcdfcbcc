use super::{Experience, Intent};
use serde::{Deserialize, Serialize};

/// Fields the step gates can mark invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    /// The visible country search text; a missing pick is flagged here.
    Country,
    Intent,
    Consent,
}

/// Free-text fields the user types into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    Phone,
    Country,
    TravelWindow,
    Message,
}

impl TextField {
    /// The gated field this input feeds, if any.
    pub fn gated(self) -> Option<Field> {
        match self {
            Self::FirstName => Some(Field::FirstName),
            Self::LastName => Some(Field::LastName),
            Self::Email => Some(Field::Email),
            Self::Country => Some(Field::Country),
            Self::Phone | Self::TravelWindow | Self::Message => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub country_code: Option<String>,
    pub intent: Option<Intent>,
    pub experience: Option<Experience>,
    pub travel_window: String,
    pub message: String,
    pub consent: bool,
}

impl LeadFields {
    pub fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::FirstName => self.first_name = value,
            TextField::LastName => self.last_name = value,
            TextField::Email => self.email = value,
            TextField::Phone => self.phone = value,
            TextField::Country => {
                self.country = value;
                // A new search invalidates the previous pick.
                self.country_code = None;
            }
            TextField::TravelWindow => self.travel_window = value,
            TextField::Message => self.message = value,
        }
    }
}
