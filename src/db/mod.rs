pub mod booking_repo;
pub mod models;
pub mod owner_repo;
pub mod profile_repo;
pub mod review_repo;
pub mod slot_repo;
pub mod turf_repo;
