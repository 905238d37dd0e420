pub mod hints;
pub mod notice;
