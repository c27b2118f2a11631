//! Admin gate secret.
//!
//! NOTE: this is a cosmetic deterrent, not an authorization boundary. The
//! secret is a compile-time constant compared verbatim, with no lockout and
//! no rate limiting. Changing it requires a code change. Anything that needs
//! real protection must sit behind proper server-side auth, which this
//! workspace deliberately does not provide.

/// The admin secret.
pub const ADMIN_SECRET: &str = "Kame2002";

/// Header carrying the secret on mutating HTTP requests.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Verbatim comparison against [`ADMIN_SECRET`].
pub fn check_secret(candidate: &str) -> bool {
    candidate == ADMIN_SECRET
}
