pub mod account;
pub mod organization;

pub use account::PostgresAccountRepository;
pub use organization::PostgresOrganizationRepository;
