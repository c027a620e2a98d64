//! External service integrations.

pub mod fetcher {
    pub use crate::fetcher::*;
}
