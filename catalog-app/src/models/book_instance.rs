use std::fmt;
use std::str::FromStr;

use catalog_data::{Document, ObjectId};
use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{format_input_date, format_long_date, BookLink, CATALOG_ROOT};

/// Circulation state of one physical copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Available,
        BookStatus::Maintenance,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    /// Accepted form values, shared by the copy form and its validation.
    pub const NAMES: [&'static str; 4] = ["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book status '{s}'"))
    }
}

/// A physical copy of a [`Book`](super::Book).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookInstance {
    #[serde(rename = "_id")]
    #[garde(skip)]
    pub id: ObjectId,
    #[garde(skip)]
    pub book: ObjectId,
    #[garde(length(min = 1))]
    pub imprint: String,
    #[serde(default)]
    #[garde(skip)]
    pub status: BookStatus,
    #[serde(default = "today")]
    #[garde(skip)]
    pub due_back: NaiveDate,
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("{CATALOG_ROOT}/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_long_date(self.due_back)
    }

    pub fn view(&self, book: Option<BookLink>) -> BookInstanceView {
        BookInstanceView {
            id: self.id,
            imprint: self.imprint.clone(),
            status: self.status,
            due_back: self.due_back,
            due_back_formatted: self.due_back_formatted(),
            due_back_yyyy_mm_dd: format_input_date(Some(self.due_back)),
            url: self.url(),
            book,
        }
    }
}

impl Document for BookInstance {
    const COLLECTION: &'static str = "bookinstances";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

/// A copy with its book resolved; `book` is `None` for a dangling reference.
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub url: String,
    pub book: Option<BookLink>,
}
