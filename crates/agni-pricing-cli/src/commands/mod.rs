pub mod fta;
pub mod incentives;
pub mod pricing;
pub mod proforma;
pub mod regulatory;
