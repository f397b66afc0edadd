//! JSON snapshot mapping
//!
//! `JsonParty` is the on-disk shape of a [`Party`]. Everything read from disk
//! goes through [`JsonParty::to_model`], so malformed values (negative prices,
//! bad timestamps, blank names) are rejected before they can reach an
//! [`OrderSet`](crate::OrderSet).

use crate::error::StoreError;
use chrono::NaiveDateTime;
use finclient_domain::{Name, Networth, Order, Party, PartyDetails, Remark};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO local date-time written for `remarkTimestamp`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Also accepted on read: ISO local date-time with seconds
const TIMESTAMP_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Serialized party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonParty {
    pub name: Option<String>,
    pub phones: Option<Vec<String>>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Order text; `null` means no order
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub remark_timestamp: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub stock_platform: String,
    #[serde(default)]
    pub networth: Decimal,
    #[serde(default)]
    pub is_hidden: bool,
}

impl From<&Party> for JsonParty {
    fn from(party: &Party) -> Self {
        let order = party.order();
        Self {
            name: Some(party.name().to_string()),
            phones: Some(party.phones().to_vec()),
            email: Some(party.email().to_string()),
            address: Some(party.address().to_string()),
            order: order.is_active().then(|| order.to_string()),
            remark: party.remark().text().to_string(),
            remark_timestamp: party
                .remark()
                .timestamp()
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string()),
            tags: party.tags().iter().cloned().collect(),
            company: party.company().to_string(),
            job: party.job().to_string(),
            stock_platform: party.stock_platform().to_string(),
            networth: party.networth().as_decimal(),
            is_hidden: party.is_hidden(),
        }
    }
}

impl JsonParty {
    /// Convert into a validated [`Party`]
    ///
    /// # Errors
    /// - `StoreError::Deserialization` if the name, phones, email or address is missing
    /// - `StoreError::Domain` if any field fails domain validation
    pub fn to_model(&self) -> Result<Party, StoreError> {
        let name = self.name.as_deref().ok_or_else(|| StoreError::missing_field("Name"))?;
        let name = Name::new(name)?;
        let phones = self.phones.as_ref().ok_or_else(|| StoreError::missing_field("PhoneList"))?;
        let email = self.email.as_ref().ok_or_else(|| StoreError::missing_field("Email"))?;
        let address = self.address.as_ref().ok_or_else(|| StoreError::missing_field("Address"))?;

        let order = match self.order.as_deref() {
            Some(text) => Order::parse(text)?,
            None => Order::none(),
        };

        let timestamp = self
            .remark_timestamp
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        let details = PartyDetails {
            phones: phones.clone(),
            email: email.clone(),
            address: address.clone(),
            remark: Remark::new(self.remark.clone(), timestamp),
            tags: self.tags.iter().cloned().collect(),
            company: self.company.clone(),
            job: self.job.clone(),
            stock_platform: self.stock_platform.clone(),
            networth: Networth::new(self.networth)?,
        };

        Ok(Party::new(name, details).with_order(order).with_hidden(self.is_hidden))
    }
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT_SECONDS))
        .map_err(|_| {
            finclient_domain::DomainError::InvalidTimestamp(format!(
                "Invalid remark timestamp: {}",
                text
            ))
            .into()
        })
}

/// Serialized order set, the file format of [`JsonFileStore`](crate::JsonFileStore)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSnapshot {
    pub parties: Vec<JsonParty>,
}

impl JsonSnapshot {
    /// Snapshot of `parties`, in order
    pub fn from_parties(parties: &[Party]) -> Self {
        Self {
            parties: parties.iter().map(JsonParty::from).collect(),
        }
    }

    /// Convert every party, failing on the first invalid one
    pub fn to_models(&self) -> Result<Vec<Party>, StoreError> {
        self.parties.iter().map(JsonParty::to_model).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
