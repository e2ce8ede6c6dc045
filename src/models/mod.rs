pub mod decoded;
pub mod filters;
pub mod log_entry;
pub mod time_off;

pub use decoded::DecodedDetails;
pub use filters::{FilledBySelection, FilterSet, LogQuery, Operation};
pub use log_entry::{Action, Domain, LogEntry};
pub use time_off::{MergedTimeOffRange, TimeOffRange};
