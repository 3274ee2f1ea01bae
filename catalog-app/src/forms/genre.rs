use catalog_core::validation::{self, chars_between, escape_html, required, unescape_html};
use catalog_core::FormData;
use catalog_data::ObjectId;
use garde::Validate;
use serde::Serialize;

use super::Submission;
use crate::models::Genre;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct GenreForm {
    #[garde(
        custom(required("Genre name required")),
        custom(chars_between(3, 100, "Genre name must contain between 3 and 100 characters"))
    )]
    pub name: String,
}

impl GenreForm {
    pub fn parse(data: &FormData) -> Submission<Self> {
        let values = Self {
            name: data.text("name"),
        };
        let errors = validation::validate(&values);
        Submission { values, errors }
    }

    pub fn into_genre(self) -> Genre {
        Genre {
            id: ObjectId::new(),
            name: escape_html(&self.name),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: unescape_html(&genre.name),
        }
    }
}
