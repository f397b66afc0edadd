//! Value Objects for the FinClient domain
//!
//! Immutable, validated domain primitives.
//! All value objects enforce invariants at construction time.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Order text or order fields are malformed
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Name must be non-blank
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Networth must be a non-negative amount
    #[error("Invalid networth: {0}")]
    InvalidNetworth(String),

    /// Remark deadline does not follow the expected format
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Unknown sort criterion
    #[error("Invalid sort criterion: {0}")]
    InvalidSortCriterion(String),
}

// =============================================================================
// Price
// =============================================================================

/// Price represents a non-negative decimal limit price
///
/// # Invariants
/// - Must be >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Constraint message reported for rejected prices
    pub const CONSTRAINTS: &'static str = "Price must be a non-negative number, e.g. $5.50";

    /// Create a new Price with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidOrder` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::InvalidOrder(Self::CONSTRAINTS.to_string()));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Zero price, used by NONE orders
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Same price with trailing zeros dropped (`5.50` → `5.5`)
    pub fn normalized(&self) -> Self {
        Self(self.0.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Quantity represents a non-negative whole number of units
///
/// Zero is only meaningful for NONE orders; `Order::new` rejects it for an
/// active side.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Quantity(u64);

impl Quantity {
    /// Constraint message reported for rejected quantities
    pub const CONSTRAINTS: &'static str = "Quantity must be a positive whole number";

    /// Create a new Quantity
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Zero quantity, used by NONE orders
    pub fn zero() -> Self {
        Self(0)
    }

    /// Check if this quantity is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// OrderSide
// =============================================================================

/// OrderSide represents the order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
    /// No pending order
    None,
}

impl OrderSide {
    /// Constraint message reported for unknown side tokens
    pub const CONSTRAINTS: &'static str = "Order side must be BUY, SELL or NONE";

    /// Check if this side carries liquidity
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderSide::None)
    }
}

impl FromStr for OrderSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            "NONE" => Ok(OrderSide::None),
            _ => Err(DomainError::InvalidOrder(Self::CONSTRAINTS.to_string())),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
            OrderSide::None => write!(f, "NONE"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Order is the single pending limit order a party may hold
///
/// # Invariants
/// - side = NONE ⇒ quantity = 0 and price = 0
/// - side ≠ NONE ⇒ quantity > 0 and price >= 0
///
/// Orders are never edited in place; an edit produces a new Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Order {
    side: OrderSide,
    quantity: Quantity,
    price: Price,
}

impl Order {
    /// Constraint message reported for text that does not follow the grammar
    pub const FORMAT_CONSTRAINTS: &'static str =
        "Order must be NONE or <BUY|SELL> <quantity> @ $<price>, e.g. BUY 10 @ $5.50";

    /// Create an active limit order
    ///
    /// # Errors
    /// Returns `DomainError::InvalidOrder` if side is NONE or quantity is zero
    pub fn new(side: OrderSide, quantity: Quantity, price: Price) -> Result<Self, DomainError> {
        if !side.is_active() {
            return Err(DomainError::InvalidOrder(
                "A NONE order carries no quantity or price".to_string(),
            ));
        }
        if quantity.is_zero() {
            return Err(DomainError::InvalidOrder(Quantity::CONSTRAINTS.to_string()));
        }
        Ok(Self { side, quantity, price })
    }

    /// The empty order
    pub fn none() -> Self {
        Self {
            side: OrderSide::None,
            quantity: Quantity::zero(),
            price: Price::zero(),
        }
    }

    /// Parse order text
    ///
    /// # Examples
    /// ```
    /// # use finclient_domain::value_objects::{Order, OrderSide};
    /// # use rust_decimal_macros::dec;
    /// let order = Order::parse("BUY 10 @ $5.50").unwrap();
    /// assert_eq!(order.side(), OrderSide::Buy);
    /// assert_eq!(order.quantity().value(), 10);
    /// assert_eq!(order.price().as_decimal(), dec!(5.50));
    ///
    /// assert!(Order::parse("BUY 10 @ $-5.50").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError::InvalidOrder` naming the violated constraint
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        match tokens.as_slice() {
            [side] => match side.parse::<OrderSide>()? {
                OrderSide::None => Ok(Self::none()),
                _ => Err(DomainError::InvalidOrder(Self::FORMAT_CONSTRAINTS.to_string())),
            },
            [side, quantity, "@", price] => {
                let side = side.parse::<OrderSide>()?;
                if !side.is_active() {
                    return Err(DomainError::InvalidOrder(Self::FORMAT_CONSTRAINTS.to_string()));
                }
                Self::new(side, parse_quantity(quantity)?, parse_price(price)?)
            },
            _ => Err(DomainError::InvalidOrder(Self::FORMAT_CONSTRAINTS.to_string())),
        }
    }

    /// Order direction
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// Order quantity (zero for NONE)
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Limit price (zero for NONE)
    pub fn price(&self) -> Price {
        self.price
    }

    /// Check if this order carries liquidity
    pub fn is_active(&self) -> bool {
        self.side.is_active()
    }
}

fn parse_quantity(token: &str) -> Result<Quantity, DomainError> {
    // u64 parsing rejects signs other than '+', so "-5" fails here
    match token.parse::<u64>() {
        Ok(0) | Err(_) => Err(DomainError::InvalidOrder(Quantity::CONSTRAINTS.to_string())),
        Ok(value) => Ok(Quantity::new(value)),
    }
}

fn parse_price(token: &str) -> Result<Price, DomainError> {
    let digits = token.strip_prefix('$').unwrap_or(token);
    let value = Decimal::from_str(digits)
        .map_err(|_| DomainError::InvalidOrder(Price::CONSTRAINTS.to_string()))?;
    Price::new(value)
}

impl Default for Order {
    fn default() -> Self {
        Self::none()
    }
}

impl FromStr for Order {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Order {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Order> for String {
    fn from(order: Order) -> Self {
        order.to_string()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            OrderSide::None => write!(f, "NONE"),
            side => write!(f, "{} {} @ ${}", side, self.quantity, self.price),
        }
    }
}

// =============================================================================
// Name
// =============================================================================

/// Name is the identity key of a party
///
/// # Invariants
/// - Must contain at least one non-whitespace character
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    /// Create a new Name, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns `DomainError::InvalidName` if the name is blank
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidName("Name must not be blank".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Networth
// =============================================================================

/// Networth is a non-negative amount used for sorting and display
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Networth(Decimal);

impl Networth {
    /// Create a new Networth with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidNetworth` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::InvalidNetworth(
                "Networth must be a non-negative amount".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Networth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| {
            DomainError::InvalidNetworth(format!("Cannot parse networth: {}", s))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Networth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Remark
// =============================================================================

/// Remark is free text with an optional deadline
///
/// Text of the form `Call back by/2025-03-27 10:30` carries a deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Remark {
    text: String,
    timestamp: Option<NaiveDateTime>,
}

impl Remark {
    /// Deadline marker inside remark text
    pub const DEADLINE_PREFIX: &'static str = "by/";

    /// Input format of the deadline
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Create a remark from its parts
    pub fn new(text: impl Into<String>, timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            timestamp,
        }
    }

    /// Parse remark text, extracting a trailing `by/<yyyy-MM-dd HH:mm>` deadline
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTimestamp` if the deadline is malformed
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        match input.split_once(Self::DEADLINE_PREFIX) {
            Some((text, deadline)) => {
                let timestamp = NaiveDateTime::parse_from_str(deadline.trim(), Self::TIMESTAMP_FORMAT)
                    .map_err(|_| {
                        DomainError::InvalidTimestamp(
                            "Invalid date/time format. Use yyyy-MM-dd HH:mm".to_string(),
                        )
                    })?;
                Ok(Self::new(text, Some(timestamp)))
            },
            None => Ok(Self::new(input, None)),
        }
    }

    /// Remark text without the deadline
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Deadline, if any
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "{} (by {})", self.text, ts.format(Self::TIMESTAMP_FORMAT)),
            None => f.write_str(&self.text),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
