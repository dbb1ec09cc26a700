//! Pre-screening workflow services.
//!
//! Two services compose the whole workflow: [`ProvisionService`] runs once
//! per process and owns the resulting session; [`ReviewService`] runs once
//! per submitted application and borrows the session read-only.

pub mod prompt;
mod provision;
mod review;

pub use provision::ProvisionService;
pub use review::ReviewService;
