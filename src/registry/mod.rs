//! Registry site specifics: locating the company detail page and reading its tables

pub mod link;
pub mod record;
pub mod tables;

pub use link::{DETAIL_CARD, absolutize, resolve_detail_link, search_url};
pub use record::{CompanyRecord, ROSTER_COLUMNS, Roster};
pub use tables::{PROFILE_TABLE, ROSTER_TABLE, extract_record};
