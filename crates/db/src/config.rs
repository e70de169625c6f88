use erp_adapter_core::config::AdapterConfig;
use erp_adapter_core::error::CoreError;

/// Default upper bound for pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database and domain configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
    /// Supported request types and other domain settings.
    pub adapter: AdapterConfig,
}

impl DbConfig {
    /// Load configuration, reading a `.env` file first if one exists.
    ///
    /// | Env Var                       | Default               |
    /// |-------------------------------|-----------------------|
    /// | `DATABASE_URL`                | required              |
    /// | `DB_MAX_CONNECTIONS`          | `20`                  |
    /// | `ERP_ADAPTER_SUPPORTED_TYPES` | `ITEM_STOCK_SUBMODEL` |
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| CoreError::Config("DATABASE_URL must be set".to_string()))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                CoreError::Config(format!("DB_MAX_CONNECTIONS must be a valid u32, got '{raw}'"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let adapter = AdapterConfig::from_lookup(&lookup)?;

        Ok(Self {
            database_url,
            max_connections,
            adapter,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use erp_adapter_core::asset_type::AssetType;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn requires_database_url() {
        assert_matches!(
            DbConfig::from_lookup(lookup(&[])),
            Err(CoreError::Config(msg)) if msg.contains("DATABASE_URL")
        );
    }

    #[test]
    fn applies_defaults() {
        let config = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/erp")]))
            .unwrap();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(
            config.adapter.supported_types.to_vec(),
            vec![AssetType::ItemStockSubmodel]
        );
    }

    #[test]
    fn reads_overrides() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/erp"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("ERP_ADAPTER_SUPPORTED_TYPES", "ITEM_STOCK_SUBMODEL,DELIVERY_SUBMODEL"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 5);
        assert!(config
            .adapter
            .supported_types
            .contains(AssetType::DeliverySubmodel));
    }

    #[test]
    fn rejects_bad_pool_size() {
        let result = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/erp"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]));
        assert_matches!(result, Err(CoreError::Config(_)));
    }
}
