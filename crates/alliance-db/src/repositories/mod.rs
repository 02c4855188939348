//! PostgreSQL repository implementations

mod error;
mod member;
mod org;
mod org_directory;

pub use error::{map_db_error, map_unique_violation};
pub use member::PgMemberRepository;
pub use org::PgOrgRepository;
pub use org_directory::PgOrgDirectory;
