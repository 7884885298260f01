// 🦁 Animal Entity - One shared record + a closed set of kinds
//
// Every animal has the same base fields (name, species, age, diet,
// environment, sound, blood type) and a kind-specific payload:
//
//   Mammal  → hair_type
//   Reptile → skin_type, is_venomous
//   Bird    → feather_type, can_fly
//
// Blood type is fixed at construction (no setter).
// Equality is structural and kind-scoped: a Mammal never equals a Reptile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::health_record::HealthRecord;
use crate::error::{ZooError, ZooResult};
use crate::validation::{require_non_negative, require_text};

// ============================================================================
// ANIMAL KIND
// ============================================================================

/// The animal category an enclosure restricts itself to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Mammal,
    Reptile,
    Bird,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Mammal, AnimalKind::Reptile, AnimalKind::Bird];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Mammal => "Mammal",
            AnimalKind::Reptile => "Reptile",
            AnimalKind::Bird => "Bird",
        }
    }
}

impl FromStr for AnimalKind {
    type Err = ZooError;

    /// Not one of the three categories is a type violation, not a bad value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimalKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ZooError::type_violation(format!(
                    "animal_type must be one of Mammal, Reptile, Bird (got '{}').",
                    s
                ))
            })
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KIND-SPECIFIC PAYLOAD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum AnimalTraits {
    Mammal { hair_type: String },
    Reptile { skin_type: String, is_venomous: bool },
    Bird { feather_type: String, can_fly: bool },
}

impl AnimalTraits {
    pub fn kind(&self) -> AnimalKind {
        match self {
            AnimalTraits::Mammal { .. } => AnimalKind::Mammal,
            AnimalTraits::Reptile { .. } => AnimalKind::Reptile,
            AnimalTraits::Bird { .. } => AnimalKind::Bird,
        }
    }
}

// ============================================================================
// BEHAVIOUR
// ============================================================================

/// What every kind of animal can do
pub trait Behavior {
    fn eat(&self) -> String;
    fn sleep(&self) -> String;
    fn make_sound(&self) -> String;
}

// ============================================================================
// ANIMAL ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Animal {
    /// Stable identity (UUID), not part of equality
    id: String,

    name: String,
    species: String,
    age: i64,
    dietary_needs: String,
    environment: String,
    sound: String,
    blood_type: String,

    #[serde(flatten)]
    traits: AnimalTraits,

    /// Insertion order, no two equal records
    health_records: Vec<HealthRecord>,
}

impl Animal {
    #[allow(clippy::too_many_arguments)]
    fn build(
        name: impl Into<String>,
        species: impl Into<String>,
        age: i64,
        dietary_needs: impl Into<String>,
        environment: impl Into<String>,
        sound: impl Into<String>,
        blood_type: impl Into<String>,
        traits: AnimalTraits,
    ) -> ZooResult<Self> {
        Ok(Animal {
            id: uuid::Uuid::new_v4().to_string(),
            name: require_text(name, "Name")?,
            species: require_text(species, "Species")?,
            age: require_non_negative(age, "Age")?,
            dietary_needs: require_text(dietary_needs, "Dietary needs")?,
            environment: require_text(environment, "Environment")?,
            sound: require_text(sound, "Sound")?,
            blood_type: blood_type.into(),
            traits,
            health_records: Vec::new(),
        })
    }

    /// Create a mammal
    ///
    /// Example: `Animal::mammal("Simba", "Lion", 5, "Carnivore", "Savannah", "Roar", "Golden", "Warm-blooded")`
    #[allow(clippy::too_many_arguments)]
    pub fn mammal(
        name: impl Into<String>,
        species: impl Into<String>,
        age: i64,
        dietary_needs: impl Into<String>,
        environment: impl Into<String>,
        sound: impl Into<String>,
        hair_type: impl Into<String>,
        blood_type: impl Into<String>,
    ) -> ZooResult<Self> {
        // Base fields are checked before the kind-specific ones
        let mut animal = Animal::build(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            blood_type,
            AnimalTraits::Mammal {
                hair_type: String::new(),
            },
        )?;
        animal.set_hair_type(hair_type)?;
        Ok(animal)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reptile(
        name: impl Into<String>,
        species: impl Into<String>,
        age: i64,
        dietary_needs: impl Into<String>,
        environment: impl Into<String>,
        sound: impl Into<String>,
        skin_type: impl Into<String>,
        blood_type: impl Into<String>,
        is_venomous: bool,
    ) -> ZooResult<Self> {
        let mut animal = Animal::build(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            blood_type,
            AnimalTraits::Reptile {
                skin_type: String::new(),
                is_venomous,
            },
        )?;
        animal.set_skin_type(skin_type)?;
        Ok(animal)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bird(
        name: impl Into<String>,
        species: impl Into<String>,
        age: i64,
        dietary_needs: impl Into<String>,
        environment: impl Into<String>,
        sound: impl Into<String>,
        feather_type: impl Into<String>,
        blood_type: impl Into<String>,
        can_fly: bool,
    ) -> ZooResult<Self> {
        let mut animal = Animal::build(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            blood_type,
            AnimalTraits::Bird {
                feather_type: String::new(),
                can_fly,
            },
        )?;
        animal.set_feather_type(feather_type)?;
        Ok(animal)
    }

    // ========================================================================
    // BASE FIELDS
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> AnimalKind {
        self.traits.kind()
    }

    pub fn traits(&self) -> &AnimalTraits {
        &self.traits
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn dietary_needs(&self) -> &str {
        &self.dietary_needs
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn sound(&self) -> &str {
        &self.sound
    }

    /// Read-only after construction
    pub fn blood_type(&self) -> &str {
        &self.blood_type
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ZooResult<()> {
        self.name = require_text(name, "Name")?;
        Ok(())
    }

    pub fn set_species(&mut self, species: impl Into<String>) -> ZooResult<()> {
        self.species = require_text(species, "Species")?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> ZooResult<()> {
        self.age = require_non_negative(age, "Age")?;
        Ok(())
    }

    pub fn set_dietary_needs(&mut self, dietary_needs: impl Into<String>) -> ZooResult<()> {
        self.dietary_needs = require_text(dietary_needs, "Dietary needs")?;
        Ok(())
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) -> ZooResult<()> {
        self.environment = require_text(environment, "Environment")?;
        Ok(())
    }

    pub fn set_sound(&mut self, sound: impl Into<String>) -> ZooResult<()> {
        self.sound = require_text(sound, "Sound")?;
        Ok(())
    }

    // ========================================================================
    // KIND-SPECIFIC FIELDS
    // ========================================================================

    fn wrong_kind(&self, field: &str, expected: AnimalKind) -> ZooError {
        ZooError::type_violation(format!(
            "{} is a {}; only a {} has a {}.",
            self.name,
            self.kind(),
            expected,
            field
        ))
    }

    pub fn hair_type(&self) -> ZooResult<&str> {
        match &self.traits {
            AnimalTraits::Mammal { hair_type } => Ok(hair_type),
            _ => Err(self.wrong_kind("hair type", AnimalKind::Mammal)),
        }
    }

    pub fn set_hair_type(&mut self, new_hair_type: impl Into<String>) -> ZooResult<()> {
        if self.kind() != AnimalKind::Mammal {
            return Err(self.wrong_kind("hair type", AnimalKind::Mammal));
        }
        let value = require_text(new_hair_type, "Hair type")?;
        if let AnimalTraits::Mammal { hair_type } = &mut self.traits {
            *hair_type = value;
        }
        Ok(())
    }

    pub fn skin_type(&self) -> ZooResult<&str> {
        match &self.traits {
            AnimalTraits::Reptile { skin_type, .. } => Ok(skin_type),
            _ => Err(self.wrong_kind("skin type", AnimalKind::Reptile)),
        }
    }

    pub fn set_skin_type(&mut self, new_skin_type: impl Into<String>) -> ZooResult<()> {
        if self.kind() != AnimalKind::Reptile {
            return Err(self.wrong_kind("skin type", AnimalKind::Reptile));
        }
        let value = require_text(new_skin_type, "Skin type")?;
        if let AnimalTraits::Reptile { skin_type, .. } = &mut self.traits {
            *skin_type = value;
        }
        Ok(())
    }

    pub fn is_venomous(&self) -> ZooResult<bool> {
        match &self.traits {
            AnimalTraits::Reptile { is_venomous, .. } => Ok(*is_venomous),
            _ => Err(self.wrong_kind("venom flag", AnimalKind::Reptile)),
        }
    }

    pub fn set_is_venomous(&mut self, venomous: bool) -> ZooResult<()> {
        match &mut self.traits {
            AnimalTraits::Reptile { is_venomous, .. } => {
                *is_venomous = venomous;
                Ok(())
            }
            _ => Err(self.wrong_kind("venom flag", AnimalKind::Reptile)),
        }
    }

    pub fn feather_type(&self) -> ZooResult<&str> {
        match &self.traits {
            AnimalTraits::Bird { feather_type, .. } => Ok(feather_type),
            _ => Err(self.wrong_kind("feather type", AnimalKind::Bird)),
        }
    }

    pub fn set_feather_type(&mut self, new_feather_type: impl Into<String>) -> ZooResult<()> {
        if self.kind() != AnimalKind::Bird {
            return Err(self.wrong_kind("feather type", AnimalKind::Bird));
        }
        let value = require_text(new_feather_type, "Feather type")?;
        if let AnimalTraits::Bird { feather_type, .. } = &mut self.traits {
            *feather_type = value;
        }
        Ok(())
    }

    pub fn can_fly(&self) -> ZooResult<bool> {
        match &self.traits {
            AnimalTraits::Bird { can_fly, .. } => Ok(*can_fly),
            _ => Err(self.wrong_kind("flight flag", AnimalKind::Bird)),
        }
    }

    pub fn set_can_fly(&mut self, flies: bool) -> ZooResult<()> {
        match &mut self.traits {
            AnimalTraits::Bird { can_fly, .. } => {
                *can_fly = flies;
                Ok(())
            }
            _ => Err(self.wrong_kind("flight flag", AnimalKind::Bird)),
        }
    }

    // ========================================================================
    // HEALTH RECORDS
    // ========================================================================

    /// Append a record; an equal record already on file is a no-op, not an error
    pub fn add_health_record(&mut self, record: HealthRecord) -> String {
        if self.health_records.contains(&record) {
            return format!("Record already exists for {}.", self.name);
        }

        debug!(animal = %self.name, issue = record.issue(), severity = record.severity_level(), "health record added");
        self.health_records.push(record);
        format!("Health record added to {}.", self.name)
    }

    /// Copy of the records; changing it does not touch the animal
    pub fn display_health_records(&self) -> Vec<HealthRecord> {
        self.health_records.clone()
    }

    pub fn has_critical_health_issues(&self) -> bool {
        self.health_records.iter().any(HealthRecord::is_critical)
    }

    /// Animals with a high/critical issue stay where they are
    pub fn can_be_moved(&self) -> bool {
        !self.has_critical_health_issues()
    }
}

impl Behavior for Animal {
    fn eat(&self) -> String {
        format!("{} the {} is eating {}.", self.name, self.species, self.dietary_needs)
    }

    fn sleep(&self) -> String {
        format!("{} the {} is sleeping.", self.name, self.species)
    }

    fn make_sound(&self) -> String {
        format!("{} {}!", self.name, self.sound)
    }
}

impl PartialEq for Animal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.species == other.species
            && self.age == other.age
            && self.dietary_needs == other.dietary_needs
            && self.environment == other.environment
            && self.sound == other.sound
            && self.blood_type == other.blood_type
            && self.traits == other.traits
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Species: {}", self.species)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Dietary needs: {}", self.dietary_needs)?;
        writeln!(f, "Environment: {}", self.environment)?;
        writeln!(f, "Sound: {}", self.sound)?;

        match &self.traits {
            AnimalTraits::Mammal { hair_type } => {
                writeln!(f, "Hair type: {}", hair_type)?;
                writeln!(f, "Blood type: {}", self.blood_type)
            }
            AnimalTraits::Reptile { skin_type, is_venomous } => {
                writeln!(f, "Skin type: {}", skin_type)?;
                writeln!(f, "Blood type: {}", self.blood_type)?;
                writeln!(f, "Is Venomous: {}", is_venomous)
            }
            AnimalTraits::Bird { feather_type, can_fly } => {
                writeln!(f, "Feather type: {}", feather_type)?;
                writeln!(f, "Blood type: {}", self.blood_type)?;
                writeln!(f, "Can Fly: {}", can_fly)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
