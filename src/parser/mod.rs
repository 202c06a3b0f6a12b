/// OnTime parser module
///
/// Parsing of user-typed values: arrival times and coordinate pairs.
pub mod coordinates;
pub mod time_parser;

pub use coordinates::parse_coordinates;
pub use time_parser::{parse_time, Period, TimeOfDay, TimeParseError, TimeShape};
