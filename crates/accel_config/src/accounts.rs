//! Account name to account id mapping.

use serde::{Deserialize, Serialize};

/// Resolves account names used in the network configuration to ids.
pub trait AccountResolver {
    /// Account id for `name`, or `None` when the account is not declared.
    fn account_id(&self, name: &str) -> Option<String>;
}

/// Root of `accounts-config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsConfig {
    #[serde(default)]
    pub mandatory_accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub workload_accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub account_id: String,
}

impl AccountsConfig {
    /// Every declared account, mandatory accounts first.
    pub fn all(&self) -> impl Iterator<Item = &AccountConfig> {
        self.mandatory_accounts
            .iter()
            .chain(self.workload_accounts.iter())
    }

    /// Account name for an id.
    pub fn account_name(&self, account_id: &str) -> Option<&str> {
        self.all()
            .find(|a| a.account_id == account_id)
            .map(|a| a.name.as_str())
    }
}

impl AccountResolver for AccountsConfig {
    fn account_id(&self, name: &str) -> Option<String> {
        self.all()
            .find(|a| a.name == name)
            .map(|a| a.account_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_mandatory_and_workload_accounts() {
        let accounts: AccountsConfig = serde_yaml::from_str(
            r#"
mandatoryAccounts:
  - name: Network
    email: network@example.com
    accountId: "111111111111"
workloadAccounts:
  - name: App
    accountId: "222222222222"
"#,
        )
        .unwrap();

        assert_eq!(accounts.account_id("Network").as_deref(), Some("111111111111"));
        assert_eq!(accounts.account_id("App").as_deref(), Some("222222222222"));
        assert_eq!(accounts.account_id("Missing"), None);
        assert_eq!(accounts.account_name("222222222222"), Some("App"));
    }
}
