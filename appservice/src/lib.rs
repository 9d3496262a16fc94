#[macro_use]
extern crate log;

mod client;
mod slot;

pub mod config;
pub mod models;

pub use client::AppServiceClient;
pub use slot::DeploymentSlot;
pub use slot::DeploymentSlotCreator;
pub use slot::DeploymentSlotEntity;
