mod client;
mod domain;
mod skyport_api;

pub use client::new_client;
pub use skyport_api::SkyportApi;
