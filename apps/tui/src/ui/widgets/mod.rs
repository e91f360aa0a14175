pub mod chrome;
pub mod hero;
pub mod popup;
pub mod tables;
