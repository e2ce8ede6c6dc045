pub mod decoder;
pub mod log;
pub mod merge;
pub mod record;
pub mod search;
pub mod session;
pub mod timeline;
pub mod timeoff;

pub use decoder::decode;
pub use merge::{merge_ranges, merge_ranges_by_coach};
pub use search::{DayGroup, DecodedEntry, filter_and_group, filter_entries, group_by_day};
pub use session::{FetchGate, FetchTicket, LogSource, TimelineSession};
