pub mod postgres;
pub mod profile_query;
pub mod profile_repository;
pub mod seed;

pub use postgres::{create_pool, create_read_only_pool, PoolSettings};
pub use profile_query::{build_profile_query, ProfileQuery};
pub use profile_repository::{PgProfileRepository, ProfileRepository};
