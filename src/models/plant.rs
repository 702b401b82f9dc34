use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: i64,
    pub name: String,
    pub interval: i64,          // days between waterings
    pub last_pour: Option<i64>, // epoch seconds, None = never watered
    pub owner_id: MemberId,
    pub image: Option<String>,
}

impl Plant {
    pub fn new(name: &str, interval: i64, owner_id: MemberId, image: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            interval,
            last_pour: None,
            owner_id,
            image,
        }
    }
}
