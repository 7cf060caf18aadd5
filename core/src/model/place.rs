use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::grade::ClimbingGrade;
use crate::model::kinds::{PlaceKind, RouteKind};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub kind: PlaceKind,
    pub details: String,
}

impl Place {
    pub fn new(name: String, kind: PlaceKind, details: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            details,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub place_id: Uuid,
    pub name: String,
    pub grade: ClimbingGrade,
    pub kind: RouteKind,
    pub details: String,
}

impl Route {
    pub fn new(place_id: Uuid, name: String, grade: ClimbingGrade, kind: RouteKind, details: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id,
            name,
            grade,
            kind,
            details,
        }
    }
}
