pub mod histogram;
pub mod reporting;
pub mod summary;
