#[macro_use]
mod macros;

pub mod cost;
pub mod electric;
pub mod energy;
pub mod power;
pub mod rate;
pub mod ratios;
pub mod time;
