mod api_interfaces;
pub mod client;
pub mod constants;
pub mod error;
pub mod generation;
pub mod routes;
pub mod upload;

pub use client::Client;
pub use routes::{group_by_city, Address};
pub use upload::{PhotoUpload, PhotoUploadBuilder};
