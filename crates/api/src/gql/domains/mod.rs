// Each domain contains: mod.rs, resolvers.rs, types.rs

pub mod leagues;
pub mod users;
