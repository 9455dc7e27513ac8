mod datetime;
mod zone;

pub use datetime::DateTime;
pub use zone::{InvalidTimezone, absolute_hours, localize, parse_timezone};

#[cfg(test)]
pub use datetime::FIXED_NOW;
