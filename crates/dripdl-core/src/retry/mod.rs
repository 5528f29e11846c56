//! Retry policy for archive downloads.
//!
//! Every failed download attempt (HTTP >= 400, transport or storage error) is
//! retried after re-authenticating, up to `max_attempts`. Once the policy is
//! exhausted the pipeline hands the decision to the operator.

mod error;
mod policy;

pub use error::DownloadError;
pub use policy::{RetryDecision, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
