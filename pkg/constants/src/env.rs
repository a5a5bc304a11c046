//! Environment variables consulted when a flag is not given.

/// Manager address fallback for `--nsx-ip`.
pub const NSX_MANAGER: &str = "NSX_MANAGER";

/// User name override, consulted only while `--nsx-user` is the default.
pub const NSX_USER: &str = "NSX_USER";

/// Password fallback for `--nsx-pass`.
pub const NSX_PASS: &str = "NSX_PASS";

/// Default user name, also the sentinel that enables the `NSX_USER` lookup.
pub const DEFAULT_USER: &str = "admin";
