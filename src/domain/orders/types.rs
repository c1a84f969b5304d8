use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the `time` column in order logs
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    /// "D"
    NewOrder,
    /// "F"
    Cancel,
    /// Any other non-empty tag. Accepted, never counted as a cancel.
    Other(String),
}

impl OrderType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "D" => OrderType::NewOrder,
            "F" => OrderType::Cancel,
            other => OrderType::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            OrderType::NewOrder => "D",
            OrderType::Cancel => "F",
            OrderType::Other(tag) => tag,
        }
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, OrderType::Cancel)
    }
}

impl From<String> for OrderType {
    fn from(tag: String) -> Self {
        OrderType::from_tag(&tag)
    }
}

impl From<OrderType> for String {
    fn from(order_type: OrderType) -> Self {
        order_type.tag().to_string()
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single order event from the order log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub time: NaiveDateTime,
    pub company: String,
    pub order_type: OrderType,
    pub quantity: u64,
}

impl OrderRecord {
    pub fn new(
        time: NaiveDateTime,
        company: impl Into<String>,
        order_type: OrderType,
        quantity: u64,
    ) -> Self {
        Self {
            time,
            company: company.into(),
            order_type,
            quantity,
        }
    }

    pub fn is_cancel(&self) -> bool {
        self.order_type.is_cancel()
    }
}
