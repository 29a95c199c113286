pub mod customer;
pub mod inventory;
pub mod rental;
pub mod staff;
