pub mod docs;
pub mod rating;
