//! Task priority levels. `Urgent` is what the Todoist apps show as "p1".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Normal = 1,
    High = 2,
    Higher = 3,
    Urgent = 4,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Normal),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Higher),
            4 => Ok(Priority::Urgent),
            other => Err(format!("priority must be between 1 and 4, got {other}")),
        }
    }
}
