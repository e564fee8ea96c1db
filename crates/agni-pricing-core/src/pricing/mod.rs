pub mod eu_zone;
pub mod quote;
