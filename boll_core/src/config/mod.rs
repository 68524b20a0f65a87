pub mod boll_config;

use std::collections::HashMap;

use crate::common::boll_exception::{BollError, ErrCode};

/// Flat key/value configuration that tracks which keys were consumed
#[derive(Debug, Default)]
pub struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    /// Remove and return a value
    pub fn take(&mut self, key: &str) -> Option<serde_json::Value> {
        self.conf.remove(key)
    }

    /// Fail on any key nobody consumed
    pub fn check(&self) -> Result<(), BollError> {
        let mut leftover: Vec<&String> = self.conf.keys().collect();
        if leftover.is_empty() {
            return Ok(());
        }
        leftover.sort();
        Err(BollError::new(
            format!(
                "unknown para = {}",
                leftover
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ErrCode::ParaError,
        ))
    }
}
