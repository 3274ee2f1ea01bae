//! Catalog entities and their derived display fields.
//!
//! Stored fields live on the entity structs. Derived ("virtual") fields such
//! as `url`, `name` or `lifespan` are computed by methods and exposed to
//! templates through the `*View` types, so they are never persisted.

mod author;
mod book;
mod book_instance;
mod genre;

pub use author::{Author, AuthorView};
pub use book::{Book, BookLink, BookView};
pub use book_instance::{BookInstance, BookInstanceView, BookStatus};
pub(crate) use book_instance::today;
pub use genre::{Genre, GenreView};

use chrono::{Datelike, NaiveDate};

/// Mount point of the catalog routes; canonical record URLs start here.
pub const CATALOG_ROOT: &str = "/catalog";

/// Long human date, e.g. `June 6th, 1965`.
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", date.format("%B"), date.year())
}

/// `YYYY-MM-DD`, the value format of `<input type="date">`.
pub fn format_input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_data::ObjectId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn author(first: &str, family: &str) -> Author {
        Author {
            id: ObjectId::new(),
            first_name: first.into(),
            family_name: family.into(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn long_dates_use_ordinal_suffixes() {
        assert_eq!(format_long_date(date(1965, 6, 6)), "June 6th, 1965");
        assert_eq!(format_long_date(date(2020, 4, 2)), "April 2nd, 2020");
        assert_eq!(format_long_date(date(1920, 1, 1)), "January 1st, 1920");
        assert_eq!(format_long_date(date(1920, 1, 23)), "January 23rd, 1920");
        assert_eq!(format_long_date(date(1920, 1, 11)), "January 11th, 1920");
        assert_eq!(format_long_date(date(1920, 1, 13)), "January 13th, 1920");
    }

    #[test]
    fn author_name_depends_on_present_parts() {
        assert_eq!(author("Patrick", "Rothfuss").name(), "Rothfuss, Patrick");
        assert_eq!(author("", "Rothfuss").name(), "Rothfuss");
        assert_eq!(author("Patrick", "").name(), "");
    }

    #[test]
    fn author_lifespan_marks_unknown_birth() {
        let mut a = author("Isaac", "Asimov");
        assert_eq!(a.lifespan(), "? - ");
        a.date_of_birth = Some(date(1920, 1, 2));
        a.date_of_death = Some(date(1992, 4, 6));
        assert_eq!(a.lifespan(), "January 2nd, 1920 - April 6th, 1992");
    }

    #[test]
    fn views_carry_urls_and_input_dates() {
        let mut a = author("Ben", "Bova");
        a.date_of_birth = Some(date(1932, 11, 8));
        let view = a.view();
        assert_eq!(view.url, format!("/catalog/author/{}", a.id));
        assert_eq!(view.date_of_birth_yyyy_mm_dd, "1932-11-08");
        assert_eq!(view.date_of_death_yyyy_mm_dd, "");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["_id"], a.id.to_string());
        assert_eq!(json["name"], "Bova, Ben");
    }

    #[test]
    fn book_status_round_trips_through_names() {
        for (status, name) in BookStatus::ALL.iter().zip(BookStatus::NAMES) {
            assert_eq!(status.as_str(), name);
            assert_eq!(name.parse::<BookStatus>().unwrap(), *status);
        }
        assert!("Lost".parse::<BookStatus>().is_err());
        assert_eq!(BookStatus::default(), BookStatus::Maintenance);
    }
}
