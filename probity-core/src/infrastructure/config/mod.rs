pub mod warehouse;

pub use warehouse::{ConnectionProfile, WarehouseConfig, load_profile, resolve};
