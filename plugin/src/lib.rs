#[macro_use]
extern crate log;

pub mod artifacts;
pub mod config;
pub mod credentials;
pub mod descriptor;
pub mod resolver;
pub mod steps;
