pub mod employee;
pub mod health;
pub mod presence;
pub mod teams;
