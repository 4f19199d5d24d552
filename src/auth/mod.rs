//! Request signing
//!
//! Every call carries `user_id`, `params`, `ts` and `sign`, where `sign` is
//! the lowercase hex MD5 of `token + "params" + params + "ts" + ts +
//! "user_id" + user_id`. The token itself never leaves the process.
//!
//! Time is read through the [`Clock`] trait so signatures can be computed
//! for a fixed timestamp in tests.

mod clock;
mod signer;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use signer::{compute_sign, signing_string, Signer};
pub use types::{Credentials, SignedEnvelope};
