pub mod feed;
pub mod insights;
