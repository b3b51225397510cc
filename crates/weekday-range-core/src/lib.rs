pub mod calendar;
pub mod dismiss;
pub mod error;
pub mod field;
pub mod grid;
pub mod picker;
pub mod range;
