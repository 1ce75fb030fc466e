use garde::Validate;
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

/// Stored publication, as exchanged with the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    pub release_date: String,
    pub cover_url: String,
}

/// Mutable part of a publication - payload of create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublicationData {
    #[garde(length(min = 1, max = 511))]
    pub title: String,
    #[serde(default)]
    #[garde(length(max = 5000))]
    pub description: Option<String>,
    #[garde(custom(iso_date))]
    pub release_date: String,
    #[garde(length(min = 1, max = 2047), url)]
    pub cover_url: String,
}

impl Publication {
    pub fn from_data(id: i64, data: PublicationData) -> Self {
        Publication {
            id,
            title: data.title,
            description: data.description,
            release_date: data.release_date,
            cover_url: data.cover_url,
        }
    }

    pub fn data(&self) -> PublicationData {
        PublicationData {
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: self.release_date.clone(),
            cover_url: self.cover_url.clone(),
        }
    }

    /// Replaces all mutable fields, id is kept
    pub fn apply(&mut self, data: PublicationData) {
        self.title = data.title;
        self.description = data.description;
        self.release_date = data.release_date;
        self.cover_url = data.cover_url;
    }
}

pub fn parse_release_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

fn iso_date(value: &str, _context: &()) -> garde::Result {
    parse_release_date(value)
        .map(|_| ())
        .map_err(|e| garde::Error::new(format!("not an ISO date (YYYY-MM-DD): {e}")))
}
