//! Value Objects for order tracking

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub static ORDER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").unwrap());

/// Order ids are stored zero-padded to this width.
const ORDER_ID_WIDTH: usize = 5;

/// Numeric order id, canonicalised to at least five digits ("42" -> "00042").
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub fn parse(value: &str) -> Result<Self, OrderIdError> {
        let value = value.trim();
        if value.is_empty() { return Err(OrderIdError::Empty); }
        if !ORDER_ID_RE.is_match(value) { return Err(OrderIdError::NotNumeric); }
        Ok(Self(format!("{:0>width$}", value, width = ORDER_ID_WIDTH)))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for OrderId {
    type Err = OrderIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for OrderId {
    type Error = OrderIdError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(&value) }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self { id.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OrderIdError { Empty, NotNumeric }
impl std::error::Error for OrderIdError {}
impl fmt::Display for OrderIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "Order ID is required"), Self::NotNumeric => write!(f, "Order ID must contain only numbers") }
    }
}

/// Whether an order has gone through the printer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrintStatus {
    #[default]
    NotPrinted,
    Printed,
}

impl PrintStatus {
    pub fn as_str(&self) -> &'static str {
        match self { Self::NotPrinted => "NOT_PRINTED", Self::Printed => "PRINTED" }
    }
    pub fn is_printed(&self) -> bool { *self == Self::Printed }
}

impl fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PrintStatus {
    type Err = PrintStatusError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "PRINTED" => Ok(Self::Printed),
            "NOT_PRINTED" => Ok(Self::NotPrinted),
            _ => Err(PrintStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)] pub struct PrintStatusError(pub String);
impl std::error::Error for PrintStatusError {}
impl fmt::Display for PrintStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Unknown print status: {}", self.0) }
}

/// Customer phone number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, PhoneError> {
        let value = value.into().trim().to_string();
        if !PHONE_RE.is_match(&value) { return Err(PhoneError); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone)] pub struct PhoneError;
impl std::error::Error for PhoneError {}
impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Invalid phone number") }
}

/// Which artwork slot a design image fills
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignSide { Front, Back, Predesigned }

impl DesignSide {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Front => "front", Self::Back => "back", Self::Predesigned => "predesigned" }
    }
}

impl fmt::Display for DesignSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

pub const DEFAULT_CURRENCY: &str = "NGN";

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn ngn(amount: Decimal) -> Self { Self::new(amount, DEFAULT_CURRENCY) }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
}

impl Default for Money { fn default() -> Self { Self::zero(DEFAULT_CURRENCY) } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_is_padded() {
        assert_eq!(OrderId::parse("42").unwrap().as_str(), "00042");
        assert_eq!(OrderId::parse(" 123456 ").unwrap().as_str(), "123456");
        assert_eq!(OrderId::parse("12a"), Err(OrderIdError::NotNumeric));
        assert_eq!(OrderId::parse(""), Err(OrderIdError::Empty));
        assert_eq!(OrderId::parse("٤٢"), Err(OrderIdError::NotNumeric));
    }

    #[test]
    fn test_order_id_serde() {
        let id: OrderId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"00007\"");
        assert!(serde_json::from_str::<OrderId>("\"x7\"").is_err());
    }

    #[test]
    fn test_print_status() {
        assert_eq!("printed".parse::<PrintStatus>().unwrap(), PrintStatus::Printed);
        assert_eq!("not printed".parse::<PrintStatus>().unwrap(), PrintStatus::NotPrinted);
        assert!("lost".parse::<PrintStatus>().is_err());
        assert_eq!(serde_json::to_string(&PrintStatus::NotPrinted).unwrap(), "\"NOT_PRINTED\"");
    }

    #[test]
    fn test_phone() {
        assert!(PhoneNumber::new("+234 803 1234567").is_err());
        assert!(PhoneNumber::new("080-312-34567").is_ok());
        assert!(PhoneNumber::new("(080)3123456").is_ok());
        assert!(PhoneNumber::new("12345").is_err());
    }
}
