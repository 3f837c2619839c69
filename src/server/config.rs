//! Server configuration parsed from CLI flags and environment.

use clap::Parser;

use crate::domain::UserIdPolicy;

/// Runtime configuration for the account service.
#[derive(Debug, Clone, Parser)]
#[command(name = "account-api", about = "Account authentication API server")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port; the `PORT` environment variable is honoured for parity with
    /// the usual container deployments.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Accept hyphens in user identifiers (legacy behaviour of one observed
    /// deployment; off by default).
    #[arg(long, default_value_t = false)]
    pub allow_hyphenated_ids: bool,
}

impl ServerConfig {
    /// Identifier policy derived from the flags.
    #[must_use]
    pub fn id_policy(&self) -> UserIdPolicy {
        UserIdPolicy {
            allow_hyphen: self.allow_hyphenated_ids,
        }
    }
}
