pub mod record;
pub mod stats;
pub mod summary;
pub mod wrong_answer;
