pub mod customers;
pub mod rentals;
