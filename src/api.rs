mod backend;
mod models;
mod source;

pub use self::{backend::Api as Backend, source::MetricsSource};
