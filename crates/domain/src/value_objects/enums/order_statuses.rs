use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Dispatched,
    Completed,
    Canceled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        };
        write!(f, "{}", status)
    }
}

impl OrderStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "pending" => OrderStatus::Pending,
            "dispatched" => OrderStatus::Dispatched,
            "completed" => OrderStatus::Completed,
            "canceled" => OrderStatus::Canceled,
            _ => OrderStatus::Pending,
        }
    }
}
