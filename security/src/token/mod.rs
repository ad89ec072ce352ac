pub mod generator;
pub mod passphrase;

pub use generator::TokenGenerator;
pub use passphrase::generate_passphrase;
