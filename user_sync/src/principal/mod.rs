mod errors;
mod session;
mod types;

pub use errors::SessionError;
pub use session::{IdentitySession, StaticSession};
pub use types::Principal;
