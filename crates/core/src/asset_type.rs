//! Submodel / asset kinds a partner can be asked for, and the direction
//! characteristic attached to stock-related requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Asset types
// ---------------------------------------------------------------------------

/// Kind of data asset exchanged with a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Dtr,
    ItemStockSubmodel,
    ProductionSubmodel,
    DemandSubmodel,
    DeliverySubmodel,
    Notification,
    PartTypeInformationSubmodel,
}

impl AssetType {
    /// Every known asset type, in declaration order.
    pub const ALL: [AssetType; 7] = [
        Self::Dtr,
        Self::ItemStockSubmodel,
        Self::ProductionSubmodel,
        Self::DemandSubmodel,
        Self::DeliverySubmodel,
        Self::Notification,
        Self::PartTypeInformationSubmodel,
    ];

    /// Return the canonical upper snake case name, as stored and configured.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dtr => "DTR",
            Self::ItemStockSubmodel => "ITEM_STOCK_SUBMODEL",
            Self::ProductionSubmodel => "PRODUCTION_SUBMODEL",
            Self::DemandSubmodel => "DEMAND_SUBMODEL",
            Self::DeliverySubmodel => "DELIVERY_SUBMODEL",
            Self::Notification => "NOTIFICATION",
            Self::PartTypeInformationSubmodel => "PART_TYPE_INFORMATION_SUBMODEL",
        }
    }

    /// SAMM semantic id of the submodel, if this asset type is a submodel.
    pub fn urn_semantic_id(&self) -> Option<&'static str> {
        match self {
            Self::ItemStockSubmodel => Some("urn:samm:io.catenax.item_stock:2.0.0#ItemStock"),
            Self::ProductionSubmodel => Some(
                "urn:samm:io.catenax.planned_production_output:2.0.0#PlannedProductionOutput",
            ),
            Self::DemandSubmodel => Some(
                "urn:samm:io.catenax.short_term_material_demand:1.0.0#ShortTermMaterialDemand",
            ),
            Self::DeliverySubmodel => {
                Some("urn:samm:io.catenax.delivery_information:2.0.0#DeliveryInformation")
            }
            Self::PartTypeInformationSubmodel => {
                Some("urn:samm:io.catenax.part_type_information:1.0.0#PartTypeInformation")
            }
            Self::Dtr | Self::Notification => None,
        }
    }

    /// Name of the submodel representation, if this asset type is a submodel.
    pub fn representation(&self) -> Option<&'static str> {
        match self {
            Self::ItemStockSubmodel => Some("ItemStock"),
            Self::ProductionSubmodel => Some("PlannedProductionOutput"),
            Self::DemandSubmodel => Some("ShortTermMaterialDemand"),
            Self::DeliverySubmodel => Some("DeliveryInformation"),
            Self::PartTypeInformationSubmodel => Some("PartTypeInformation"),
            Self::Dtr | Self::Notification => None,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "Unknown asset type '{s}'. Must be one of: {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Direction characteristic
// ---------------------------------------------------------------------------

/// Whether a stock is held for inbound (supplied to us) or outbound material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectionCharacteristic {
    Inbound,
    Outbound,
}

impl DirectionCharacteristic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "INBOUND",
            Self::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for DirectionCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectionCharacteristic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INBOUND" => Ok(Self::Inbound),
            "OUTBOUND" => Ok(Self::Outbound),
            _ => Err(CoreError::Config(format!(
                "Unknown direction characteristic '{s}'. Must be one of: INBOUND, OUTBOUND"
            ))),
        }
    }
}
