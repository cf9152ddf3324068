pub mod application;
pub mod authz;
pub mod identity;
pub mod job;
pub mod ticket;
