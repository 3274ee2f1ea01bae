use catalog_core::validation::stored_chars;
use catalog_data::{Document, ObjectId};
use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{format_input_date, format_long_date, CATALOG_ROOT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Author {
    #[serde(rename = "_id")]
    #[garde(skip)]
    pub id: ObjectId,
    #[garde(custom(stored_chars(1, 100)))]
    pub first_name: String,
    #[garde(custom(stored_chars(1, 100)))]
    pub family_name: String,
    #[serde(default)]
    #[garde(skip)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    #[garde(skip)]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// `"family_name, first_name"`; family name alone without a first name,
    /// and empty without a family name.
    pub fn name(&self) -> String {
        match (self.family_name.is_empty(), self.first_name.is_empty()) {
            (true, _) => String::new(),
            (false, true) => self.family_name.clone(),
            (false, false) => format!("{}, {}", self.family_name, self.first_name),
        }
    }

    /// `June 6th, 1965 - April 2nd, 2020`, with `?` for an unknown birth
    /// date and nothing for a missing death date.
    pub fn lifespan(&self) -> String {
        let birth = self
            .date_of_birth
            .map(format_long_date)
            .unwrap_or_else(|| "?".to_string());
        let death = self.date_of_death.map(format_long_date).unwrap_or_default();
        format!("{birth} - {death}")
    }

    pub fn url(&self) -> String {
        format!("{CATALOG_ROOT}/author/{}", self.id)
    }

    pub fn view(&self) -> AuthorView {
        AuthorView {
            name: self.name(),
            lifespan: self.lifespan(),
            url: self.url(),
            date_of_birth_yyyy_mm_dd: format_input_date(self.date_of_birth),
            date_of_death_yyyy_mm_dd: format_input_date(self.date_of_death),
            author: self.clone(),
        }
    }
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

/// Template-facing author: stored fields plus virtuals.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub lifespan: String,
    pub url: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}
