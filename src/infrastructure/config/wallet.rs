//! Signing key material.

use serde::Deserialize;

use crate::error::ConfigError;

/// Where the signing key comes from.
///
/// The key itself is never read from the config file: it is taken from
/// `WALLET_PRIVATE_KEY`, or decrypted from `keystore_path` at load time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Encrypted JSON keystore, used when `WALLET_PRIVATE_KEY` is unset.
    #[serde(default)]
    pub keystore_path: Option<String>,
    /// Hex private key resolved at load time.
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl WalletConfig {
    /// The resolved private key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when neither the environment
    /// nor a keystore supplied one.
    pub fn private_key(&self) -> Result<&str, ConfigError> {
        self.private_key
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_env_var() {
        let wallet = WalletConfig::default();
        assert!(matches!(
            wallet.private_key(),
            Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY"
            })
        ));
    }

    #[test]
    fn keystore_path_deserializes() {
        let wallet: WalletConfig = toml::from_str("keystore_path = \"keys/main.json\"").unwrap();
        assert_eq!(wallet.keystore_path.as_deref(), Some("keys/main.json"));
        assert!(wallet.private_key.is_none());
    }
}
