pub mod dashboard;
pub mod loan;
