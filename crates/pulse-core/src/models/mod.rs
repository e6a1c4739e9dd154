pub mod response;
pub mod survey;
