//! Auth service configuration

use argon2::Params;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Argon2 memory cost in KiB
    pub argon2_m_cost: u32,
    /// Argon2 iteration count
    pub argon2_t_cost: u32,
    /// Argon2 parallelism
    pub argon2_p_cost: u32,
    /// Cron expression for the expired-session sweeper; `None` disables it
    pub sweep_schedule: Option<String>,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_BIND_ADDR`: listener address (default: "0.0.0.0:3000")
    /// - `ARGON2_M_COST` / `ARGON2_T_COST` / `ARGON2_P_COST`: hashing costs,
    ///   clamped upward to the argon2 defaults by the hasher
    /// - `SESSION_SWEEP_SCHEDULE`: sweeper cron expression (default: hourly;
    ///   set to `off` to disable)
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("AUTH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let argon2_m_cost = env_u32("ARGON2_M_COST", Params::DEFAULT_M_COST);
        let argon2_t_cost = env_u32("ARGON2_T_COST", Params::DEFAULT_T_COST);
        let argon2_p_cost = env_u32("ARGON2_P_COST", Params::DEFAULT_P_COST);

        let sweep_schedule = match std::env::var("SESSION_SWEEP_SCHEDULE") {
            Ok(v) if v == "off" => None,
            Ok(v) => Some(v),
            Err(_) => Some("0 0 * * * *".to_string()),
        };

        Self {
            bind_addr,
            argon2_m_cost,
            argon2_t_cost,
            argon2_p_cost,
            sweep_schedule,
        }
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
