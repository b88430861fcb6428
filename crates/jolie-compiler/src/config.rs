//! Verifier configuration.

use serde::Deserialize;

/// Options recognised by the structural verifier.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Report a missing `main` procedure. Disabled for libraries that are
    /// only included by other programs.
    pub check_for_main: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_for_main(mut self, value: bool) -> Self {
        self.check_for_main = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_for_main: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn default_checks_for_main() {
        assert!(Config::default().check_for_main);
        assert!(!Config::new().check_for_main(false).check_for_main);
    }

    #[test]
    fn deserialize_partial() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = serde_json::from_str(r#"{"checkForMain": false}"#).unwrap();
        assert!(!config.check_for_main);
    }
}
