//! Address Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Address type tag - determines which order roles an address may fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Shipping,
    Billing,
    Both,
}

impl AddressType {
    /// Whether this address can be used as a shipping address
    pub fn supports_shipping(&self) -> bool {
        matches!(self, Self::Shipping | Self::Both)
    }

    /// Whether this address can be used as a billing address
    pub fn supports_billing(&self) -> bool {
        matches!(self, Self::Billing | Self::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Billing => "billing",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shipping" => Ok(Self::Shipping),
            "billing" => Ok(Self::Billing),
            "both" => Ok(Self::Both),
            other => Err(format!("invalid address_type: {}", other)),
        }
    }
}

/// Address entity (relational ledger)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Address id (uuid)
    pub address_id: String,
    /// Owning user id (issued by the external auth layer)
    pub user_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub address_type: AddressType,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub address_type: AddressType,
    #[serde(default)]
    pub is_default: bool,
}

/// Update address payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub address_type: Option<AddressType>,
    pub is_default: Option<bool>,
}
