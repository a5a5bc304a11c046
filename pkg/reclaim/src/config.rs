use pkg_nsx::config::non_empty;
use pkg_nsx::{ConfigError, Connection, ConnectionArgs};

/// Reclaim flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ReclaimArgs {
    pub connection: ConnectionArgs,
    pub t0_id: Option<String>,
    pub pool_id: Option<String>,
    pub delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimConfig {
    pub connection: Connection,
    /// Tier-0 router whose NAT rules consume pool addresses.
    pub t0_id: String,
    pub pool_id: String,
    /// Release orphaned addresses instead of only listing them.
    pub delete: bool,
}

impl ReclaimArgs {
    pub fn resolve<F>(self, env: &F) -> Result<ReclaimConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let connection = self.connection.resolve(env, &mut missing);
        let t0_id = non_empty(self.t0_id);
        if t0_id.is_none() {
            missing.push("t0-id");
        }
        let pool_id = non_empty(self.pool_id);
        if pool_id.is_none() {
            missing.push("pool-id");
        }

        match (connection, t0_id, pool_id) {
            (Some(connection), Some(t0_id), Some(pool_id)) => Ok(ReclaimConfig {
                connection,
                t0_id,
                pool_id,
                delete: self.delete,
            }),
            _ => Err(ConfigError::MissingRequiredFields(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn requires_router_and_pool() {
        let args = ReclaimArgs {
            connection: ConnectionArgs {
                manager: Some("nsx".to_string()),
                user: "admin".to_string(),
                password: Some("pw".to_string()),
            },
            ..Default::default()
        };
        let err = args.resolve(&no_env).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingRequiredFields(vec!["t0-id", "pool-id"])
        );
    }

    #[test]
    fn delete_defaults_off() {
        let args = ReclaimArgs {
            connection: ConnectionArgs {
                manager: None,
                user: "admin".to_string(),
                password: None,
            },
            t0_id: Some("t0".to_string()),
            pool_id: Some("pool".to_string()),
            delete: false,
        };
        let env = |k: &str| match k {
            "NSX_MANAGER" => Some("env-nsx".to_string()),
            "NSX_PASS" => Some("pw".to_string()),
            _ => None,
        };
        let cfg = args.resolve(&env).unwrap();
        assert!(!cfg.delete);
        assert_eq!(cfg.connection.manager, "env-nsx");
        assert_eq!(cfg.pool_id, "pool");
    }
}
