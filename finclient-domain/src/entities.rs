//! Domain Entities for FinClient
//!
//! A `Party` is a managed contact holding at most one pending order.
//! Parties have identity (their name) separate from their full value.

use crate::value_objects::{DomainError, Name, Networth, Order, Remark};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Party
// =============================================================================

/// Party represents a managed contact and its pending order
///
/// Two comparisons matter for collections of parties:
/// - [`same_identity`]: same name, used for uniqueness and replacement
/// - [`same_value`]: every recorded field equal, used for exact removal
///
/// The `hidden` flag is display state only and takes part in neither.
#[derive(Debug, Clone)]
pub struct Party {
    name: Name,
    phones: Vec<String>,
    email: String,
    address: String,
    remark: Remark,
    tags: BTreeSet<String>,
    company: String,
    job: String,
    stock_platform: String,
    networth: Networth,
    order: Order,
    hidden: bool,
}

/// Optional fields of a party, grouped so construction stays readable
#[derive(Debug, Clone, Default)]
pub struct PartyDetails {
    pub phones: Vec<String>,
    pub email: String,
    pub address: String,
    pub remark: Remark,
    pub tags: BTreeSet<String>,
    pub company: String,
    pub job: String,
    pub stock_platform: String,
    pub networth: Networth,
}

impl Party {
    /// Create a party with no pending order
    pub fn new(name: Name, details: PartyDetails) -> Self {
        let PartyDetails {
            phones,
            email,
            address,
            remark,
            tags,
            company,
            job,
            stock_platform,
            networth,
        } = details;

        Self {
            name,
            phones,
            email,
            address,
            remark,
            tags,
            company,
            job,
            stock_platform,
            networth,
            order: Order::none(),
            hidden: false,
        }
    }

    /// Copy of this party holding `order` instead of its current one
    pub fn with_order(&self, order: Order) -> Self {
        Self { order, ..self.clone() }
    }

    /// Copy of this party with a new remark
    pub fn with_remark(&self, remark: Remark) -> Self {
        Self { remark, ..self.clone() }
    }

    /// Copy of this party with the display flag set
    pub fn with_hidden(&self, hidden: bool) -> Self {
        Self { hidden, ..self.clone() }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn remark(&self) -> &Remark {
        &self.remark
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn stock_platform(&self) -> &str {
        &self.stock_platform
    }

    pub fn networth(&self) -> Networth {
        self.networth
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Deadline taken from the remark, if any
    pub fn deadline(&self) -> Option<NaiveDateTime> {
        self.remark.timestamp()
    }

    /// Read-only display view honouring the hidden flag
    pub fn view(&self) -> PartyView<'_> {
        PartyView { party: self }
    }

    /// Compare two parties under a sort criterion (ascending)
    pub fn compare(&self, other: &Party, criterion: SortCriterion) -> Ordering {
        match criterion {
            SortCriterion::Name => self.name.cmp(&other.name),
            SortCriterion::Networth => self.networth.cmp(&other.networth),
            SortCriterion::Amount => self.order.quantity().cmp(&other.order.quantity()),
            SortCriterion::Price => self.order.price().cmp(&other.order.price()),
            SortCriterion::Deadline => match (self.deadline(), other.deadline()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// True if both parties denote the same contact (same name)
pub fn same_identity(a: &Party, b: &Party) -> bool {
    a.name == b.name
}

/// True if every recorded field of both parties is equal
pub fn same_value(a: &Party, b: &Party) -> bool {
    a.name == b.name
        && a.phones == b.phones
        && a.email == b.email
        && a.address == b.address
        && a.remark == b.remark
        && a.tags == b.tags
        && a.company == b.company
        && a.job == b.job
        && a.stock_platform == b.stock_platform
        && a.networth == b.networth
        && a.order == b.order
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        same_value(self, other)
    }
}

impl Eq for Party {}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view().fmt(f)
    }
}

// =============================================================================
// Sort Criterion
// =============================================================================

/// Named orderings a collection of parties can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// Name, lexicographic
    Name,
    /// Networth amount
    Networth,
    /// Order quantity
    Amount,
    /// Order limit price
    Price,
    /// Remark deadline, parties without one last
    Deadline,
}

impl SortCriterion {
    /// All criteria, in display order
    pub const ALL: [SortCriterion; 5] = [
        SortCriterion::Name,
        SortCriterion::Networth,
        SortCriterion::Amount,
        SortCriterion::Price,
        SortCriterion::Deadline,
    ];

    /// Lowercase criterion name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Name => "name",
            SortCriterion::Networth => "networth",
            SortCriterion::Amount => "amount",
            SortCriterion::Price => "price",
            SortCriterion::Deadline => "deadline",
        }
    }
}

impl FromStr for SortCriterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::InvalidSortCriterion(format!(
                    "{}. Expected: name, networth, amount, price, deadline",
                    s
                ))
            })
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Party View (display masking)
// =============================================================================

/// Display view over a party
///
/// While the party is hidden, sensitive fields read as placeholders. The
/// underlying party is never modified, so placeholders cannot leak into
/// order snapshots.
#[derive(Debug, Clone, Copy)]
pub struct PartyView<'a> {
    party: &'a Party,
}

impl<'a> PartyView<'a> {
    pub const HIDDEN_PHONE: &'static str = "00000000";
    pub const HIDDEN_EMAIL: &'static str = "hidden@example.com";
    pub const HIDDEN_FIELD: &'static str = "Hidden";
    pub const HIDDEN_REMARK: &'static str = "Sensitive details are hidden";

    fn masked(&self) -> bool {
        self.party.hidden
    }

    fn field(&self, value: &'a str) -> &'a str {
        if self.masked() {
            Self::HIDDEN_FIELD
        } else {
            value
        }
    }

    pub fn name(&self) -> &'a Name {
        &self.party.name
    }

    pub fn order(&self) -> &'a Order {
        &self.party.order
    }

    pub fn phones(&self) -> Cow<'a, [String]> {
        if self.masked() {
            Cow::Owned(vec![Self::HIDDEN_PHONE.to_string()])
        } else {
            Cow::Borrowed(&self.party.phones)
        }
    }

    pub fn email(&self) -> &'a str {
        if self.masked() {
            Self::HIDDEN_EMAIL
        } else {
            &self.party.email
        }
    }

    pub fn address(&self) -> &'a str {
        self.field(&self.party.address)
    }

    pub fn company(&self) -> &'a str {
        self.field(&self.party.company)
    }

    pub fn job(&self) -> &'a str {
        self.field(&self.party.job)
    }

    pub fn stock_platform(&self) -> &'a str {
        self.field(&self.party.stock_platform)
    }

    pub fn networth(&self) -> Cow<'a, str> {
        if self.masked() {
            Cow::Borrowed(Self::HIDDEN_FIELD)
        } else {
            Cow::Owned(self.party.networth.to_string())
        }
    }

    pub fn remark(&self) -> Cow<'a, str> {
        if self.masked() {
            Cow::Borrowed(Self::HIDDEN_REMARK)
        } else {
            Cow::Owned(self.party.remark.to_string())
        }
    }

    pub fn tags(&self) -> Vec<&'a str> {
        if self.masked() {
            Vec::new()
        } else {
            self.party.tags.iter().map(String::as_str).collect()
        }
    }
}

impl fmt::Display for PartyView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phones: {}; Email: {}; Address: {}; Order: {}; Remark: {}; Tags: [{}]; \
             Company: {}; Job: {}; Stock platform: {}; Networth: {}",
            self.name(),
            self.phones().join(", "),
            self.email(),
            self.address(),
            self.order(),
            self.remark(),
            self.tags().join(", "),
            self.company(),
            self.job(),
            self.stock_platform(),
            self.networth(),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
