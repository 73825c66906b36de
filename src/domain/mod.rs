pub mod git;
pub mod hours;
pub mod record;
