pub mod json;
pub mod messages;
