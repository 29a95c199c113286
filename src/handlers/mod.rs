pub mod common;
pub mod customers;
pub mod health;
pub mod rentals;
