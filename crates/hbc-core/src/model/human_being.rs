use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::mood::Mood;
use crate::errors::{HbcError, Result};

/// Upper bound on `impact_speed`
pub const MAX_IMPACT_SPEED: i64 = 662;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub name: String,
    pub cool: bool,
}

/// Element shape supplied by a client for `insert`, `update` and
/// `remove_greater`; the server assigns `id` and `creation_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanBeingDraft {
    pub name: String,
    pub coordinates: Coordinates,
    pub real_hero: bool,
    pub has_toothpick: bool,
    pub impact_speed: i64,
    pub soundtrack_name: String,
    pub minutes_of_waiting: i64,
    pub mood: Mood,
    #[serde(default)]
    pub car: Option<Car>,
}

impl HumanBeingDraft {
    /// Check field constraints
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HbcError::validation("Name should not be empty"));
        }
        if self.soundtrack_name.trim().is_empty() {
            return Err(HbcError::validation("Soundtrack name should not be empty"));
        }
        if self.impact_speed > MAX_IMPACT_SPEED {
            return Err(HbcError::validation(format!(
                "Impact speed should be at most {MAX_IMPACT_SPEED}"
            )));
        }
        if self.minutes_of_waiting < 0 {
            return Err(HbcError::validation(
                "Minutes of waiting should not be negative",
            ));
        }
        if let Some(car) = &self.car {
            if car.name.trim().is_empty() {
                return Err(HbcError::validation("Car name should not be empty"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanBeing {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: DateTime<Utc>,
    pub real_hero: bool,
    pub has_toothpick: bool,
    pub impact_speed: i64,
    pub soundtrack_name: String,
    pub minutes_of_waiting: i64,
    pub mood: Mood,
    pub car: Option<Car>,
}

impl HumanBeing {
    /// Materialize a draft with a server-assigned id
    pub fn from_draft(id: i64, draft: HumanBeingDraft) -> Self {
        Self {
            id,
            name: draft.name,
            coordinates: draft.coordinates,
            creation_date: Utc::now(),
            real_hero: draft.real_hero,
            has_toothpick: draft.has_toothpick,
            impact_speed: draft.impact_speed,
            soundtrack_name: draft.soundtrack_name,
            minutes_of_waiting: draft.minutes_of_waiting,
            mood: draft.mood,
            car: draft.car,
        }
    }

    /// Replace every client-editable field, keeping `id` and `creation_date`
    pub fn apply_draft(&mut self, draft: HumanBeingDraft) {
        let id = self.id;
        let creation_date = self.creation_date;
        *self = Self::from_draft(id, draft);
        self.creation_date = creation_date;
    }

    /// Natural ordering: impact speed, then name
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.impact_speed
            .cmp(&other.impact_speed)
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Compare against a draft using the natural ordering
    pub fn cmp_draft(&self, draft: &HumanBeingDraft) -> Ordering {
        self.impact_speed
            .cmp(&draft.impact_speed)
            .then_with(|| self.name.as_str().cmp(draft.name.as_str()))
    }

    pub fn car_name(&self) -> Option<&str> {
        self.car.as_ref().map(|car| car.name.as_str())
    }
}

impl std::fmt::Display for HumanBeing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}, {}) mood={} speed={} waiting={}min soundtrack=\"{}\" hero={} toothpick={}",
            self.id,
            self.name,
            self.coordinates.x,
            self.coordinates.y,
            self.mood,
            self.impact_speed,
            self.minutes_of_waiting,
            self.soundtrack_name,
            self.real_hero,
            self.has_toothpick,
        )?;
        match &self.car {
            Some(car) => write!(f, " car={}{}", car.name, if car.cool { " (cool)" } else { "" }),
            None => write!(f, " car=none"),
        }
    }
}
