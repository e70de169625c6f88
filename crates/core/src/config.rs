use crate::error::CoreError;
use crate::validation::allow_list::SupportedRequestTypes;

/// Env var holding the comma-separated list of supported request types.
pub const SUPPORTED_TYPES_ENV: &str = "ERP_ADAPTER_SUPPORTED_TYPES";

/// Domain configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Asset types requests may be issued for.
    pub supported_types: SupportedRequestTypes,
}

impl AdapterConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default               |
    /// |-------------------------------|-----------------------|
    /// | `ERP_ADAPTER_SUPPORTED_TYPES` | `ITEM_STOCK_SUBMODEL` |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let supported_types = match lookup(SUPPORTED_TYPES_ENV) {
            Some(raw) => raw.parse::<SupportedRequestTypes>().map_err(|e| match e {
                CoreError::Config(msg) => {
                    CoreError::Config(format!("{SUPPORTED_TYPES_ENV}: {msg}"))
                }
                other => other,
            })?,
            None => SupportedRequestTypes::default(),
        };

        Ok(Self { supported_types })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::asset_type::AssetType;

    #[test]
    fn defaults_to_item_stock_only() {
        let config = AdapterConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.supported_types, SupportedRequestTypes::default());
    }

    #[test]
    fn reads_supported_types_list() {
        let config = AdapterConfig::from_lookup(|key| {
            (key == SUPPORTED_TYPES_ENV).then(|| "ITEM_STOCK_SUBMODEL,DEMAND_SUBMODEL".to_string())
        })
        .unwrap();
        assert!(config.supported_types.contains(AssetType::DemandSubmodel));
        assert!(config.supported_types.contains(AssetType::ItemStockSubmodel));
    }

    #[test]
    fn invalid_list_names_the_variable() {
        let result = AdapterConfig::from_lookup(|_| Some("NOPE".to_string()));
        assert_matches!(result, Err(CoreError::Config(msg)) if msg.starts_with(SUPPORTED_TYPES_ENV));
    }
}
