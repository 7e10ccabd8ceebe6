pub mod employee;
pub mod presence;
pub mod role;
pub mod team;
