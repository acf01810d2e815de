//! Default environment snapshot recorded when the caller supplies none

use std::collections::BTreeMap;

use crate::config::ReportConfig;

/// Host platform, runtime version, configured browser and base URL
pub fn default_environment(config: &ReportConfig) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("platform".to_string(), platform());
    env.insert("runtime_version".to_string(), runtime_version());
    env.insert("browser".to_string(), config.browser.clone());
    env.insert("base_url".to_string(), config.base_url.clone());
    env
}

fn platform() -> String {
    format!(
        "{}-{}-{}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::env::consts::FAMILY
    )
}

fn runtime_version() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), crate::VERSION)
}
