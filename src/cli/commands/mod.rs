mod schema;
mod seed;

pub use schema::cmd_schema;
pub use seed::cmd_seed;
