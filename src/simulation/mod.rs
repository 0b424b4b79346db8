pub mod driver;
pub mod history;
