pub mod connection;
pub mod models;
pub mod pg_vector_index;
pub mod repositories;
pub mod schema;

pub use connection::{DbPool, create_connection_pool, get_connection_from_pool, run_migrations};
pub use pg_vector_index::PgVectorIndex;
