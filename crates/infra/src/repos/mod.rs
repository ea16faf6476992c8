pub mod leagues;
pub mod users;
