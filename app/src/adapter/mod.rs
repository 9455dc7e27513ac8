pub mod board_api;
pub mod ical;
