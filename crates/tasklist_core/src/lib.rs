pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
