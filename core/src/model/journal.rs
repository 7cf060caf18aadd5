use serde::{Deserialize, Serialize};

use crate::model::climbing::Climbing;
use crate::model::place::{Place, Route};

pub const SCHEMA_VERSION: u32 = 3;

/// Everything the journal persists, stored as a single JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Journal {
    pub schema_version: u32,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub climbings: Vec<Climbing>,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            places: Vec::new(),
            routes: Vec::new(),
            climbings: Vec::new(),
        }
    }
}
