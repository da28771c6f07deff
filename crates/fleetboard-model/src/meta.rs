use serde::{Deserialize, Serialize};

/// Dashboard-wide metadata, loaded once per cycle and immutable for the
/// session. `last_updated` is Unix epoch seconds; `console_domain` seeds
/// the external link families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DashboardMeta {
    pub last_updated: u64,
    pub console_domain: String,
}

impl Default for DashboardMeta {
    fn default() -> Self {
        Self {
            last_updated: 0,
            console_domain: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_uses_the_upstream_camel_case_wire_form() {
        let meta: DashboardMeta = serde_json::from_str(
            r#"{"lastUpdated": 1700000000, "consoleDomain": "eu-west-1.console.aws.amazon.com"}"#,
        )
        .expect("meta");
        assert_eq!(meta.last_updated, 1_700_000_000);
        assert_eq!(meta.console_domain, "eu-west-1.console.aws.amazon.com");
    }
}
