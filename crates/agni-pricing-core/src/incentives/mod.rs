pub mod advisory;
pub mod schedule;
pub mod share;
