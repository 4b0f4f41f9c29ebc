mod average;
mod integrate;

pub use self::{average::Average, integrate::Integrate};
