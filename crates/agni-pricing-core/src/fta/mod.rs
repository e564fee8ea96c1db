pub mod savings;
