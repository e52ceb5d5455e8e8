pub mod caller;
pub mod collection;
pub mod record;
pub mod role;
pub mod types;

pub use caller::Caller;
pub use collection::Collection;
pub use record::{Category, Doctor, Media, Organisation, User};
pub use role::Role;
pub use types::DocumentId;
