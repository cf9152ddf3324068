pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::application;
pub use domain::authz;
pub use domain::identity;
pub use domain::job;
pub use domain::ticket;
pub use outbound::repositories;
