use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub trait ToDumpTimestamp {
    /// Second resolution timestamp used in dump file names, e.g. `20240131_174502`.
    fn to_dump_timestamp(&self) -> String;
}

impl<Tz: TimeZone> ToDumpTimestamp for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn to_dump_timestamp(&self) -> String {
        self.format("%Y%m%d_%H%M%S").to_string()
    }
}
