use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DashboardError, Result};

/// Two-letter state code to full state name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationMap {
    names: HashMap<String, String>,
}

impl AbbreviationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code; the first name registered for a code is kept
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) -> bool {
        let code = code.into();
        if self.names.contains_key(&code) {
            return false;
        }
        self.names.insert(code, name.into());
        true
    }

    pub fn state_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve the state of a "Name, ST" city string from its last two characters
    pub fn resolve_city_state(&self, city: &str) -> Result<&str> {
        let code = state_code_suffix(city).ok_or_else(|| DashboardError::StateLookup {
            city: city.to_string(),
            code: String::new(),
        })?;

        self.state_name(&code)
            .ok_or_else(|| DashboardError::StateLookup {
                city: city.to_string(),
                code,
            })
    }
}

impl FromIterator<(String, String)> for AbbreviationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = AbbreviationMap::new();
        for (code, name) in iter {
            map.insert(code, name);
        }
        map
    }
}

/// Last two characters of a city string, `None` when it is shorter
pub fn state_code_suffix(city: &str) -> Option<String> {
    let mut tail: Vec<char> = city.chars().rev().take(2).collect();
    if tail.len() < 2 {
        return None;
    }
    tail.reverse();
    Some(tail.into_iter().collect())
}
