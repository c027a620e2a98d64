// Extraction pipeline, admission control and shared errors/models
pub mod extractor {
    pub use crate::extractor::*;
}

pub mod navigators {
    pub use crate::navigators::*;
}

pub mod calculators {
    pub use crate::calculators::*;
}

pub mod path {
    pub use crate::path::*;
}

pub mod profile {
    pub use crate::profile::*;
}

pub mod rate_limiter {
    pub use crate::rate_limiter::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
