mod credentials;
mod reporter;

pub use credentials::CredentialStore;
pub use credentials::FileStore;
pub use credentials::MemoryStore;
pub use credentials::StoreError;
pub use reporter::ConsoleReporter;
pub use reporter::ErrorReporter;
