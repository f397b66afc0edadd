//! Fluent construction of parties for tests.

use finclient_domain::{Name, Networth, Order, Party, PartyDetails, Remark};
use rust_decimal::Decimal;

/// Builds a [`Party`] field by field.
///
/// Setters take plain text and panic on invalid input; fixtures are expected
/// to be valid.
#[derive(Debug, Clone)]
pub struct PartyBuilder {
    name: String,
    details: PartyDetails,
    order: Order,
    hidden: bool,
}

impl PartyBuilder {
    /// Start a party with the given name and empty fields.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            details: PartyDetails::default(),
            order: Order::none(),
            hidden: false,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_phones(mut self, phones: &[&str]) -> Self {
        self.details.phones = phones.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.details.email = email.to_string();
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.details.address = address.to_string();
        self
    }

    pub fn with_remark(mut self, remark: Remark) -> Self {
        self.details.remark = remark;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.details.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.details.company = company.to_string();
        self
    }

    pub fn with_job(mut self, job: &str) -> Self {
        self.details.job = job.to_string();
        self
    }

    pub fn with_stock_platform(mut self, platform: &str) -> Self {
        self.details.stock_platform = platform.to_string();
        self
    }

    /// Panics if `networth` is negative.
    pub fn with_networth(mut self, networth: Decimal) -> Self {
        self.details.networth = Networth::new(networth).expect("fixture networth");
        self
    }

    /// Panics if `order` does not parse.
    pub fn with_order(mut self, order: &str) -> Self {
        self.order = Order::parse(order).expect("fixture order");
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Panics if the name is blank.
    pub fn build(self) -> Party {
        let name = Name::new(&self.name).expect("fixture name");
        Party::new(name, self.details)
            .with_order(self.order)
            .with_hidden(self.hidden)
    }
}

impl From<Party> for PartyBuilder {
    fn from(party: Party) -> Self {
        Self {
            name: party.name().to_string(),
            details: PartyDetails {
                phones: party.phones().to_vec(),
                email: party.email().to_string(),
                address: party.address().to_string(),
                remark: party.remark().clone(),
                tags: party.tags().clone(),
                company: party.company().to_string(),
                job: party.job().to_string(),
                stock_platform: party.stock_platform().to_string(),
                networth: party.networth(),
            },
            order: *party.order(),
            hidden: party.is_hidden(),
        }
    }
}
