//! Planet entity and business rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Mass every gas giant is normalized to
pub const GAS_GIANT_MASS: f64 = 5.0;

/// Gravity constant used for gas giants in the fuel model
const GAS_GIANT_GRAVITY_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanetType {
    GasGiant,
    Terrestrial,
}

impl PlanetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetType::GasGiant => "gas_giant",
            PlanetType::Terrestrial => "terrestrial",
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gas_giant" => Ok(PlanetType::GasGiant),
            "terrestrial" => Ok(PlanetType::Terrestrial),
            other => Err(format!("Invalid planet type: {}", other)),
        }
    }
}

/// A stored planet
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub distance: i64,
    pub radius: f64,
    pub mass: f64,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
}

impl Planet {
    /// Surface gravity used by the fuel model
    pub fn gravity(&self) -> f64 {
        let factor = match self.planet_type {
            PlanetType::GasGiant => GAS_GIANT_GRAVITY_FACTOR,
            PlanetType::Terrestrial => self.mass,
        };
        factor / (self.radius * self.radius)
    }

    /// Estimated fuel cost of a trip for `crew_capacity` people
    pub fn fuel_cost(&self, crew_capacity: i64) -> f64 {
        let gravity = self.gravity();
        self.distance as f64 / (gravity * gravity) * crew_capacity as f64
    }
}

/// Planet fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_mass"))]
pub struct PlanetDraft {
    #[validate(length(min = 1, message = "Name and description are required."))]
    pub name: String,

    #[validate(length(min = 1, message = "Name and description are required."))]
    pub description: String,

    #[validate(range(
        exclusive_min = 10,
        exclusive_max = 1000,
        message = "Distance should be between 10 and 1000."
    ))]
    pub distance: i64,

    #[validate(range(
        exclusive_min = 0.1,
        exclusive_max = 10.0,
        message = "Radius should be between 0.1 and 10."
    ))]
    pub radius: f64,

    /// Ignored for gas giants, which always have mass 5
    #[serde(default)]
    pub mass: f64,

    #[serde(rename = "type")]
    pub planet_type: PlanetType,
}

impl PlanetDraft {
    /// Apply type-specific rules; a gas giant's mass is always `GAS_GIANT_MASS`
    pub fn normalized(self) -> Self {
        match self.planet_type {
            PlanetType::GasGiant => Self {
                mass: GAS_GIANT_MASS,
                ..self
            },
            PlanetType::Terrestrial => self,
        }
    }

    pub fn into_planet(self, id: i64) -> Planet {
        Planet {
            id,
            name: self.name,
            description: self.description,
            distance: self.distance,
            radius: self.radius,
            mass: self.mass,
            planet_type: self.planet_type,
        }
    }
}

fn validate_mass(draft: &PlanetDraft) -> Result<(), ValidationError> {
    if draft.planet_type == PlanetType::GasGiant {
        return Ok(());
    }
    if draft.mass > 0.1 && draft.mass < 10.0 {
        Ok(())
    } else {
        Err(ValidationError::new("mass_range")
            .with_message("Mass should be between 0.1 and 10.".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(planet_type: PlanetType, mass: f64) -> PlanetDraft {
        PlanetDraft {
            name: "Pluto".to_string(),
            description: "Dwarf".to_string(),
            distance: 50,
            radius: 2.0,
            mass,
            planet_type,
        }
    }

    #[test]
    fn fuel_cost_terrestrial() {
        let planet = draft(PlanetType::Terrestrial, 2.0).into_planet(1);
        // gravity = 2 / 4 = 0.5, cost = 50 / 0.25 * 10
        assert_eq!(planet.fuel_cost(10), 2000.0);
    }

    #[test]
    fn fuel_cost_gas_giant_ignores_mass() {
        let planet = PlanetDraft {
            distance: 20,
            radius: 1.0,
            ..draft(PlanetType::GasGiant, 9.0)
        }
        .into_planet(1);
        // gravity = 0.5 / 1, cost = 20 / 0.25 * 1
        assert_eq!(planet.fuel_cost(1), 80.0);
    }

    #[test]
    fn gas_giant_mass_normalized() {
        let normalized = draft(PlanetType::GasGiant, 0.0).normalized();
        assert_eq!(normalized.mass, GAS_GIANT_MASS);

        let terrestrial = draft(PlanetType::Terrestrial, 2.0).normalized();
        assert_eq!(terrestrial.mass, 2.0);
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft(PlanetType::Terrestrial, 2.0).validate().is_ok());
        assert!(draft(PlanetType::GasGiant, 0.0).validate().is_ok());
    }

    #[test]
    fn bounds_are_exclusive() {
        let at_min = PlanetDraft {
            distance: 10,
            ..draft(PlanetType::Terrestrial, 2.0)
        };
        assert!(at_min.validate().is_err());

        let at_max = PlanetDraft {
            radius: 10.0,
            ..draft(PlanetType::Terrestrial, 2.0)
        };
        assert!(at_max.validate().is_err());

        assert!(draft(PlanetType::Terrestrial, 0.1).validate().is_err());
        assert!(draft(PlanetType::Terrestrial, 10.0).validate().is_err());
    }

    #[test]
    fn empty_name_rejected() {
        let unnamed = PlanetDraft {
            name: String::new(),
            ..draft(PlanetType::Terrestrial, 2.0)
        };
        let errors = unnamed.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn type_decodes_snake_case() {
        let parsed: PlanetDraft = serde_json::from_str(
            r#"{"name":"Jupiter","description":"Big","distance":20,"radius":9,"type":"gas_giant"}"#,
        )
        .unwrap();
        assert_eq!(parsed.planet_type, PlanetType::GasGiant);
        assert_eq!(parsed.mass, 0.0);
    }

    #[test]
    fn unknown_type_rejected_at_decoding() {
        let parsed = serde_json::from_str::<PlanetDraft>(
            r#"{"name":"X","description":"Y","distance":20,"radius":1,"mass":1,"type":"ice_giant"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn planet_serializes_type_key() {
        let planet = draft(PlanetType::Terrestrial, 2.0).into_planet(7);
        let json = serde_json::to_value(&planet).unwrap();
        assert_eq!(json["type"], "terrestrial");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn planet_type_from_str() {
        assert_eq!("gas_giant".parse::<PlanetType>(), Ok(PlanetType::GasGiant));
        assert!("GAS_GIANT".parse::<PlanetType>().is_err());
    }
}
