//! Supported request type allow-list.
//!
//! The set of asset types a partner may be asked for is configuration. New
//! kinds are onboarded by changing the set, never the validation code.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use super::rules::UnsupportedRequestTypeError;
use crate::asset_type::AssetType;
use crate::error::CoreError;

/// Asset types requests may currently be issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedRequestTypes(BTreeSet<AssetType>);

impl SupportedRequestTypes {
    pub fn new(types: impl IntoIterator<Item = AssetType>) -> Self {
        Self(types.into_iter().collect())
    }

    pub fn contains(&self, value: AssetType) -> bool {
        self.0.contains(&value)
    }

    pub fn insert(&mut self, value: AssetType) -> bool {
        self.0.insert(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in a stable order, for error reporting.
    pub fn to_vec(&self) -> Vec<AssetType> {
        self.0.iter().copied().collect()
    }
}

impl Default for SupportedRequestTypes {
    /// Only item stock requests are handled by partner ERP adapters today.
    fn default() -> Self {
        Self::new([AssetType::ItemStockSubmodel])
    }
}

impl FromStr for SupportedRequestTypes {
    type Err = CoreError;

    /// Parse a comma-separated list of asset type names, e.g.
    /// `"ITEM_STOCK_SUBMODEL, DELIVERY_SUBMODEL"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let types = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(AssetType::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if types.is_empty() {
            return Err(CoreError::Config(
                "Supported request types must name at least one asset type".to_string(),
            ));
        }
        Ok(Self(types))
    }
}

/// Provides the supported type set in effect right now.
pub trait SupportedTypesSource: Send + Sync {
    fn supported_types(&self) -> SupportedRequestTypes;
}

impl SupportedTypesSource for SupportedRequestTypes {
    fn supported_types(&self) -> SupportedRequestTypes {
        self.clone()
    }
}

/// A supported type set that can be replaced while the system runs.
///
/// Cheaply cloneable; all clones observe the same set.
#[derive(Debug, Clone, Default)]
pub struct SharedSupportedTypes(Arc<RwLock<SupportedRequestTypes>>);

impl SharedSupportedTypes {
    pub fn new(initial: SupportedRequestTypes) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    /// Swap in a new set. Records validated afterwards see the new set.
    pub fn replace(&self, types: SupportedRequestTypes) {
        let mut guard = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = types;
    }

    /// Add a single type, returning `true` if it was not yet supported.
    pub fn allow(&self, value: AssetType) -> bool {
        let mut guard = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(value)
    }
}

impl SupportedTypesSource for SharedSupportedTypes {
    fn supported_types(&self) -> SupportedRequestTypes {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Validate that `value` is in the supported set.
pub fn validate_request_type(
    value: AssetType,
    supported: &SupportedRequestTypes,
) -> Result<(), UnsupportedRequestTypeError> {
    if supported.contains(value) {
        Ok(())
    } else {
        Err(UnsupportedRequestTypeError {
            value,
            allowed: supported.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_supports_only_item_stock() {
        let supported = SupportedRequestTypes::default();
        assert_eq!(supported.to_vec(), vec![AssetType::ItemStockSubmodel]);
    }

    #[test]
    fn every_member_passes_and_every_other_type_fails() {
        let supported =
            SupportedRequestTypes::new([AssetType::ItemStockSubmodel, AssetType::DemandSubmodel]);
        for t in AssetType::ALL {
            let result = validate_request_type(t, &supported);
            assert_eq!(result.is_ok(), supported.contains(t), "{t}");
        }
    }

    #[test]
    fn failure_names_value_and_allowed_set() {
        let supported = SupportedRequestTypes::default();
        let err = validate_request_type(AssetType::ProductionSubmodel, &supported).unwrap_err();
        assert_eq!(err.value, AssetType::ProductionSubmodel);
        assert_eq!(err.allowed, vec![AssetType::ItemStockSubmodel]);
    }

    #[test]
    fn empty_set_rejects_everything() {
        let supported = SupportedRequestTypes::new(Vec::new());
        assert!(supported.is_empty());
        assert!(validate_request_type(AssetType::ItemStockSubmodel, &supported).is_err());
    }

    #[test]
    fn parses_comma_separated_list() {
        let supported: SupportedRequestTypes = " ITEM_STOCK_SUBMODEL ,DELIVERY_SUBMODEL,"
            .parse()
            .unwrap();
        assert_eq!(
            supported.to_vec(),
            vec![AssetType::ItemStockSubmodel, AssetType::DeliverySubmodel]
        );
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert_matches!(
            "ITEM_STOCK_SUBMODEL,BOGUS".parse::<SupportedRequestTypes>(),
            Err(CoreError::Config(_))
        );
        assert_matches!(
            " , ".parse::<SupportedRequestTypes>(),
            Err(CoreError::Config(_))
        );
    }

    #[test]
    fn shared_set_changes_are_visible_to_clones() {
        let shared = SharedSupportedTypes::new(SupportedRequestTypes::default());
        let reader = shared.clone();
        assert!(!reader.supported_types().contains(AssetType::DeliverySubmodel));

        assert!(shared.allow(AssetType::DeliverySubmodel));
        assert!(!shared.allow(AssetType::DeliverySubmodel));
        assert!(reader.supported_types().contains(AssetType::DeliverySubmodel));

        shared.replace(SupportedRequestTypes::new([AssetType::DemandSubmodel]));
        assert_eq!(
            reader.supported_types().to_vec(),
            vec![AssetType::DemandSubmodel]
        );
    }
}
