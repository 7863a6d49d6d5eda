pub mod auth;
pub mod bookings;
pub mod health;
pub mod owners;
pub mod players;
pub mod reviews;
pub mod routes;
pub mod slots;
pub mod turfs;
