//! Shell configuration model.
//!
//! Every field has a default so a partial (or missing) `config.toml`
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::notification::Notification;
use crate::preference::SIDEBAR_COLLAPSED_KEY;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Unauthenticated landing path that redirects go to.
    pub entry_route: String,
    /// Preference key holding the sidebar collapse flag.
    pub collapse_preference_key: String,
    #[serde(rename = "logout")]
    pub logout_messages: LogoutMessages,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            entry_route: "/".to_string(),
            collapse_preference_key: SIDEBAR_COLLAPSED_KEY.to_string(),
            logout_messages: LogoutMessages::default(),
        }
    }
}

/// Texts of the two logout notifications.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogoutMessages {
    pub success_title: String,
    pub success_description: String,
    pub failure_title: String,
    pub failure_description: String,
}

impl Default for LogoutMessages {
    fn default() -> Self {
        Self {
            success_title: "Logout realizado com sucesso".to_string(),
            success_description: "Você foi desconectado do sistema.".to_string(),
            failure_title: "Erro ao fazer logout".to_string(),
            failure_description: "Ocorreu um erro ao tentar desconectar.".to_string(),
        }
    }
}

impl LogoutMessages {
    pub fn success(&self) -> Notification {
        Notification::info(&self.success_title, &self.success_description)
    }

    pub fn failure(&self) -> Notification {
        Notification::destructive(&self.failure_title, &self.failure_description)
    }
}
