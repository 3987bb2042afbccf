use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DeliveryBatchStatus {
    #[default]
    Open,
    Locked,
    Dispatched,
    Completed,
}

impl Display for DeliveryBatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            DeliveryBatchStatus::Open => "open",
            DeliveryBatchStatus::Locked => "locked",
            DeliveryBatchStatus::Dispatched => "dispatched",
            DeliveryBatchStatus::Completed => "completed",
        };
        write!(f, "{}", status)
    }
}

impl DeliveryBatchStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "open" => DeliveryBatchStatus::Open,
            "locked" => DeliveryBatchStatus::Locked,
            "dispatched" => DeliveryBatchStatus::Dispatched,
            "completed" => DeliveryBatchStatus::Completed,
            _ => DeliveryBatchStatus::Open,
        }
    }
}
