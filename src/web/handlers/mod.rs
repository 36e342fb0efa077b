pub mod posts;
pub mod retry;
pub mod status;
