pub mod date;
pub mod formatting;
pub mod path;
pub mod time;

pub use date::normalize_date;
