mod interval;
pub mod time;

pub use interval::Interval;
