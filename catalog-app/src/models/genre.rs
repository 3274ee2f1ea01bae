use catalog_core::validation::stored_chars;
use catalog_data::{Document, ObjectId};
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::CATALOG_ROOT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Genre {
    #[serde(rename = "_id")]
    #[garde(skip)]
    pub id: ObjectId,
    #[garde(custom(stored_chars(3, 100)))]
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("{CATALOG_ROOT}/genre/{}", self.id)
    }

    pub fn view(&self) -> GenreView {
        GenreView {
            url: self.url(),
            genre: self.clone(),
        }
    }
}

impl Document for Genre {
    const COLLECTION: &'static str = "genres";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    #[serde(flatten)]
    pub genre: Genre,
    pub url: String,
}
