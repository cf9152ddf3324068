pub mod application;
pub mod identity;
pub mod job;
pub mod ticket;

pub use application::PostgresApplicationRepository;
pub use identity::PostgresIdentityRepository;
pub use job::PostgresJobRepository;
pub use ticket::PostgresTicketRepository;
