pub mod learning;
pub mod wrong_answers;
