use pkg_constants::api::{API_PREFIX, DEFAULT_SCHEME};
use pkg_constants::env::{DEFAULT_USER, NSX_MANAGER, NSX_PASS, NSX_USER};

/// Manager connection flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub manager: Option<String>,
    /// `admin` unless overridden; `admin` also enables the `NSX_USER` lookup.
    pub user: String,
    pub password: Option<String>,
}

/// Resolved manager address and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub manager: String,
    pub user: String,
    pub password: String,
}

impl ConnectionArgs {
    /// Fill absent values from `env`. Absent mandatory fields are pushed onto
    /// `missing` so callers can report all of them at once.
    pub fn resolve<F>(self, env: &F, missing: &mut Vec<&'static str>) -> Option<Connection>
    where
        F: Fn(&str) -> Option<String>,
    {
        let manager = or_env(self.manager, NSX_MANAGER, env);
        let password = or_env(self.password, NSX_PASS, env);

        let user = if self.user.is_empty() || self.user == DEFAULT_USER {
            non_empty(env(NSX_USER)).unwrap_or_else(|| DEFAULT_USER.to_string())
        } else {
            self.user
        };

        if manager.is_none() {
            missing.push("nsx-ip");
        }
        if password.is_none() {
            missing.push("nsx-pass");
        }

        Some(Connection {
            manager: manager?,
            user,
            password: password?,
        })
    }
}

impl Connection {
    /// API root, e.g. `https://nsx.example.com/api/v1`.
    /// An address that already carries a scheme is used as-is.
    pub fn base_url(&self) -> String {
        let origin = self.manager.trim_end_matches('/');
        if origin.contains("://") {
            format!("{}{}", origin, API_PREFIX)
        } else {
            format!("{}{}{}", DEFAULT_SCHEME, origin, API_PREFIX)
        }
    }
}

/// Treat empty strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Explicit argument first, then the environment variable `key`.
pub fn or_env<F>(arg: Option<String>, key: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(arg).or_else(|| non_empty(env(key)))
}
