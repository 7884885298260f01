// 🏞️ Enclosure Entity - One category, one environment
//
// An enclosure accepts only animals of its `animal_type` whose environment
// matches its `environmental_type`. It points at animals that live in the
// zoo registry; it does not own them.
//
// Cleanliness is a gauge in [0, 100]: degraded by use (clamped at 0),
// reset to 100 by cleaning.

use std::fmt;
use tracing::debug;

use super::animal::{Animal, AnimalKind};
use super::AnimalRef;
use crate::error::{ZooError, ZooResult};
use crate::validation::{require_percentage, require_text, PERCENT_MAX, PERCENT_MIN};

// ============================================================================
// ENCLOSURE ENTITY
// ============================================================================

/// Enclosure - identity is its UUID; two enclosures with the same fields are
/// still two different enclosures.
#[derive(Debug)]
pub struct Enclosure {
    /// Stable identity (UUID) - NEVER changes
    id: String,

    size: String,
    environmental_type: String,
    animal_type: AnimalKind,
    cleanliness_level: f64,

    /// Handles onto animals held by the zoo, in arrival order
    animals: Vec<AnimalRef>,
}

impl Enclosure {
    pub const DEFAULT_CLEANLINESS: f64 = 100.0;
    pub const DEFAULT_DEGRADE_AMOUNT: f64 = 10.0;

    /// Create a spotless enclosure (cleanliness 100)
    pub fn new(
        size: impl Into<String>,
        environmental_type: impl Into<String>,
        animal_type: AnimalKind,
    ) -> ZooResult<Self> {
        Enclosure::with_cleanliness(size, environmental_type, animal_type, Self::DEFAULT_CLEANLINESS)
    }

    pub fn with_cleanliness(
        size: impl Into<String>,
        environmental_type: impl Into<String>,
        animal_type: AnimalKind,
        cleanliness_level: f64,
    ) -> ZooResult<Self> {
        Ok(Enclosure {
            id: uuid::Uuid::new_v4().to_string(),
            size: require_text(size, "Size")?,
            environmental_type: require_text(environmental_type, "Environmental type")?,
            animal_type,
            cleanliness_level: require_percentage(cleanliness_level, "Cleanliness level")?,
            animals: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn environmental_type(&self) -> &str {
        &self.environmental_type
    }

    pub fn animal_type(&self) -> AnimalKind {
        self.animal_type
    }

    pub fn cleanliness_level(&self) -> f64 {
        self.cleanliness_level
    }

    /// Copy of the animal handles; pushing to it does not change the enclosure
    pub fn animals(&self) -> Vec<AnimalRef> {
        self.animals.clone()
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn contains(&self, animal: &AnimalRef) -> bool {
        self.animals.iter().any(|held| held == animal)
    }

    pub fn set_size(&mut self, size: impl Into<String>) -> ZooResult<()> {
        self.size = require_text(size, "Size")?;
        Ok(())
    }

    /// Refused while an occupant lives in a different environment
    pub fn set_environmental_type(&mut self, environmental_type: impl Into<String>) -> ZooResult<()> {
        let environmental_type = require_text(environmental_type, "Environmental type")?;

        if let Some(name) = self.first_occupant(|a| a.environment() != environmental_type) {
            return Err(ZooError::value_violation(format!(
                "Cannot change environment to {}: {} still lives here.",
                environmental_type, name
            )));
        }

        self.environmental_type = environmental_type;
        Ok(())
    }

    /// Refused while an occupant is of another category
    pub fn set_animal_type(&mut self, animal_type: AnimalKind) -> ZooResult<()> {
        if let Some(name) = self.first_occupant(|a| a.kind() != animal_type) {
            return Err(ZooError::value_violation(format!(
                "Cannot change animal type to {}: {} still lives here.",
                animal_type, name
            )));
        }

        self.animal_type = animal_type;
        Ok(())
    }

    fn first_occupant(&self, mut misfit: impl FnMut(&Animal) -> bool) -> Option<String> {
        self.animals.iter().find_map(|held| {
            let a = held.read();
            if misfit(&*a) {
                Some(a.name().to_string())
            } else {
                None
            }
        })
    }

    pub fn set_cleanliness_level(&mut self, level: f64) -> ZooResult<()> {
        self.cleanliness_level = require_percentage(level, "Cleanliness level")?;
        Ok(())
    }

    // ========================================================================
    // OCCUPANTS
    // ========================================================================

    /// Place an animal in this enclosure
    ///
    /// Wrong category → type violation (checked first).
    /// Already present or wrong environment → value violation.
    pub fn add_animal(&mut self, animal: &AnimalRef) -> ZooResult<String> {
        // Copy what we need and release the lock before comparing handles
        let (kind, name, species, environment) = {
            let a = animal.read();
            (
                a.kind(),
                a.name().to_string(),
                a.species().to_string(),
                a.environment().to_string(),
            )
        };

        if kind != self.animal_type {
            return Err(ZooError::type_violation(format!(
                "This enclosure only accepts {}s.",
                self.animal_type
            )));
        }

        if self.contains(animal) {
            return Err(ZooError::value_violation(format!(
                "{} is already in this enclosure.",
                name
            )));
        }

        if environment != self.environmental_type {
            return Err(ZooError::value_violation(format!(
                "{} cannot be placed in a {} enclosure.",
                name, self.environmental_type
            )));
        }

        self.animals.push(animal.clone());
        debug!(enclosure = %self.environmental_type, animal = %name, "animal placed");
        Ok(format!("{} the {} has been added to the enclosure.", name, species))
    }

    pub fn remove_animal(&mut self, animal: &AnimalRef) -> ZooResult<String> {
        let (name, species) = {
            let a = animal.read();
            (a.name().to_string(), a.species().to_string())
        };

        let position = self
            .animals
            .iter()
            .position(|held| held == animal)
            .ok_or_else(|| ZooError::value_violation(format!("{} is not in this enclosure.", name)))?;

        self.animals.remove(position);
        debug!(enclosure = %self.environmental_type, animal = %name, "animal removed");
        Ok(format!("{} the {} has been removed from the enclosure.", name, species))
    }

    /// Drop every handle equal to `animal`; returns how many were dropped
    pub(crate) fn detach_animal(&mut self, animal: &AnimalRef) -> usize {
        let before = self.animals.len();
        self.animals.retain(|held| held != animal);
        before - self.animals.len()
    }

    // ========================================================================
    // CLEANLINESS
    // ========================================================================

    /// Restore cleanliness to 100
    pub fn clean_enclosure(&mut self) -> String {
        let previous = self.cleanliness_level;
        if previous == PERCENT_MAX {
            return "The enclosure is already 100% clean.".to_string();
        }

        self.cleanliness_level = PERCENT_MAX;
        debug!(enclosure = %self.environmental_type, from = previous, "enclosure cleaned");
        format!(
            "Enclosure cleaned. Cleanliness restored from {}% to 100%.",
            previous
        )
    }

    /// Lower cleanliness by `amount` (default 10), never below 0
    ///
    /// `degrade_cleanliness(15.0)` or `degrade_cleanliness(None)`.
    pub fn degrade_cleanliness(&mut self, amount: impl Into<Option<f64>>) -> ZooResult<String> {
        let amount = amount.into().unwrap_or(Self::DEFAULT_DEGRADE_AMOUNT);
        let amount = require_percentage(amount, "Amount")?;

        let previous = self.cleanliness_level;
        if previous == PERCENT_MIN {
            return Ok(
                "The enclosure is already at 0% cleanliness (cannot degrade further).".to_string(),
            );
        }

        self.cleanliness_level = (previous - amount).max(PERCENT_MIN);
        debug!(
            enclosure = %self.environmental_type,
            from = previous,
            to = self.cleanliness_level,
            "cleanliness degraded"
        );
        Ok(format!(
            "Cleanliness degraded from {}% to {}%.",
            previous, self.cleanliness_level
        ))
    }

    // ========================================================================
    // REPORTING
    // ========================================================================

    pub fn report_status(&self) -> String {
        let animal_list = if self.animals.is_empty() {
            "No animals currently in this enclosure.".to_string()
        } else {
            self.animals
                .iter()
                .map(|a| a.read().name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "Enclosure type: {}\nEnvironment: {}\nSize: {}\nCleanliness level: {}\nNumber of animals: {}\nList of animals: {}\n",
            self.animal_type,
            self.environmental_type,
            self.size,
            self.cleanliness_level,
            self.animals.len(),
            animal_list
        )
    }
}

impl PartialEq for Enclosure {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report_status())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Shared;
    use proptest::prelude::*;

    fn lion(name: &str) -> AnimalRef {
        Shared::new(
            Animal::mammal(name, "Lion", 5, "Carnivore", "Savannah", "Roar", "Golden", "Warm-blooded")
                .unwrap(),
        )
    }

    fn savannah() -> Enclosure {
        Enclosure::with_cleanliness("Large", "Savannah", AnimalKind::Mammal, 85.0).unwrap()
    }

    #[test]
    fn test_enclosure_creation() {
        let enclosure = Enclosure::new("Large", "Savannah", AnimalKind::Mammal).unwrap();

        assert_eq!(enclosure.size(), "Large");
        assert_eq!(enclosure.environmental_type(), "Savannah");
        assert_eq!(enclosure.animal_type(), AnimalKind::Mammal);
        assert_eq!(enclosure.cleanliness_level(), 100.0);
        assert_eq!(enclosure.animal_count(), 0);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(Enclosure::new("", "Savannah", AnimalKind::Mammal).unwrap_err().is_value());
        assert!(Enclosure::new("Large", "  ", AnimalKind::Mammal).unwrap_err().is_value());
        assert!(Enclosure::with_cleanliness("Large", "Savannah", AnimalKind::Bird, 101.0)
            .unwrap_err()
            .is_value());
        assert!(Enclosure::with_cleanliness("Large", "Savannah", AnimalKind::Bird, -1.0)
            .unwrap_err()
            .is_value());
        assert!(Enclosure::with_cleanliness("Large", "Savannah", AnimalKind::Bird, f64::NAN)
            .unwrap_err()
            .is_type());
    }

    #[test]
    fn test_add_and_remove_animal() {
        let mut enclosure = savannah();
        let simba = lion("Simba");

        assert_eq!(
            enclosure.add_animal(&simba).unwrap(),
            "Simba the Lion has been added to the enclosure."
        );
        assert!(enclosure.contains(&simba));

        let err = enclosure.add_animal(&simba).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Simba is already in this enclosure.");

        assert_eq!(
            enclosure.remove_animal(&simba).unwrap(),
            "Simba the Lion has been removed from the enclosure."
        );
        assert_eq!(enclosure.animal_count(), 0);

        let err = enclosure.remove_animal(&simba).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Simba is not in this enclosure.");
    }

    #[test]
    fn test_equal_animal_counts_as_present() {
        let mut enclosure = savannah();
        enclosure.add_animal(&lion("Simba")).unwrap();

        // A different handle with identical fields is the same animal
        assert!(enclosure.add_animal(&lion("Simba")).unwrap_err().is_value());
    }

    #[test]
    fn test_wrong_kind_is_type_violation_before_environment_check() {
        let mut enclosure = savannah();
        let parrot = Shared::new(
            Animal::bird("Polly", "Parrot", 2, "Seeds", "Tropical", "Squawk", "Colorful", "Warm", true)
                .unwrap(),
        );

        let err = enclosure.add_animal(&parrot).unwrap_err();
        assert!(err.is_type());
        assert_eq!(err.message(), "This enclosure only accepts Mammals.");
    }

    #[test]
    fn test_wrong_environment_rejected() {
        let mut enclosure = savannah();
        let bear = Shared::new(
            Animal::mammal("Baloo", "Bear", 9, "Honey", "Forest", "Growl", "Thick", "Warm").unwrap(),
        );

        let err = enclosure.add_animal(&bear).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Baloo cannot be placed in a Savannah enclosure.");
    }

    #[test]
    fn test_animals_is_a_copy() {
        let mut enclosure = savannah();
        enclosure.add_animal(&lion("Simba")).unwrap();

        let mut animals = enclosure.animals();
        animals.push(lion("Nala"));
        animals.clear();

        assert_eq!(enclosure.animal_count(), 1);
    }

    #[test]
    fn test_mutation_through_registry_handle_is_visible() {
        let mut enclosure = savannah();
        let simba = lion("Simba");
        enclosure.add_animal(&simba).unwrap();

        simba.write().set_name("King Simba").unwrap();

        assert!(enclosure.report_status().contains("List of animals: King Simba"));
    }

    #[test]
    fn test_degrade_scenario() {
        let mut enclosure = savannah();

        let message = enclosure.degrade_cleanliness(15.0).unwrap();
        assert_eq!(enclosure.cleanliness_level(), 70.0);
        assert!(message.contains("85% to 70%"));
    }

    #[test]
    fn test_degrade_default_and_clamp() {
        let mut enclosure = savannah();

        enclosure.degrade_cleanliness(None).unwrap();
        assert_eq!(enclosure.cleanliness_level(), 75.0);

        assert_eq!(
            enclosure.degrade_cleanliness(100.0).unwrap(),
            "Cleanliness degraded from 75% to 0%."
        );
        assert_eq!(enclosure.cleanliness_level(), 0.0);

        assert_eq!(
            enclosure.degrade_cleanliness(5.0).unwrap(),
            "The enclosure is already at 0% cleanliness (cannot degrade further)."
        );
    }

    #[test]
    fn test_degrade_rejects_bad_amounts() {
        let mut enclosure = savannah();

        assert!(enclosure.degrade_cleanliness(-5.0).unwrap_err().is_value());
        assert!(enclosure.degrade_cleanliness(150.0).unwrap_err().is_value());
        assert!(enclosure.degrade_cleanliness(f64::NAN).unwrap_err().is_type());
        assert_eq!(enclosure.cleanliness_level(), 85.0);
    }

    #[test]
    fn test_clean_is_idempotent_at_100() {
        let mut enclosure = savannah();

        assert_eq!(
            enclosure.clean_enclosure(),
            "Enclosure cleaned. Cleanliness restored from 85% to 100%."
        );
        assert_eq!(enclosure.clean_enclosure(), "The enclosure is already 100% clean.");
        assert_eq!(enclosure.cleanliness_level(), 100.0);
    }

    #[test]
    fn test_report_status() {
        let mut enclosure = savannah();
        assert_eq!(
            enclosure.report_status(),
            "Enclosure type: Mammal\nEnvironment: Savannah\nSize: Large\nCleanliness level: 85\n\
             Number of animals: 0\nList of animals: No animals currently in this enclosure.\n"
        );

        enclosure.add_animal(&lion("Simba")).unwrap();
        enclosure.add_animal(&lion("Nala")).unwrap();
        let report = enclosure.to_string();
        assert!(report.contains("Number of animals: 2\n"));
        assert!(report.contains("List of animals: Simba, Nala\n"));
    }

    #[test]
    fn test_setters_validate() {
        let mut enclosure = savannah();

        enclosure.set_size("Huge").unwrap();
        assert_eq!(enclosure.size(), "Huge");
        assert!(enclosure.set_size("  ").unwrap_err().is_value());
        assert_eq!(enclosure.size(), "Huge");

        enclosure.set_environmental_type("Grassland").unwrap();
        assert_eq!(enclosure.environmental_type(), "Grassland");
        assert!(enclosure.set_environmental_type("").unwrap_err().is_value());

        enclosure.set_cleanliness_level(42.5).unwrap();
        assert_eq!(enclosure.cleanliness_level(), 42.5);
        assert!(enclosure.set_cleanliness_level(100.5).unwrap_err().is_value());
        assert!(enclosure.set_cleanliness_level(f64::NAN).unwrap_err().is_type());
        assert_eq!(enclosure.cleanliness_level(), 42.5);

        enclosure.set_animal_type(AnimalKind::Bird).unwrap();
        assert_eq!(enclosure.animal_type(), AnimalKind::Bird);
    }

    #[test]
    fn test_setters_keep_occupants_valid() {
        let mut enclosure = savannah();
        enclosure.add_animal(&lion("Simba")).unwrap();

        let err = enclosure.set_environmental_type("Arctic").unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Cannot change environment to Arctic: Simba still lives here.");
        assert_eq!(enclosure.environmental_type(), "Savannah");

        let err = enclosure.set_animal_type(AnimalKind::Reptile).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Cannot change animal type to Reptile: Simba still lives here.");
        assert_eq!(enclosure.animal_type(), AnimalKind::Mammal);

        // Same values are still accepted
        enclosure.set_environmental_type("Savannah").unwrap();
        enclosure.set_animal_type(AnimalKind::Mammal).unwrap();
    }

    #[test]
    fn test_animal_environment_change_is_not_policed() {
        // An animal does not know which enclosures hold it
        let mut enclosure = savannah();
        let simba = lion("Simba");
        enclosure.add_animal(&simba).unwrap();

        simba.write().set_environment("Jungle").unwrap();

        assert!(enclosure.contains(&simba));
        assert_eq!(simba.read().environment(), "Jungle");
    }

    #[test]
    fn test_identity_equality() {
        let a = savannah();
        let b = savannah();

        assert_eq!(a, a);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_animals_copy_never_changes_enclosure(count in 0usize..8, extra in 0usize..5) {
            let mut enclosure = savannah();
            for i in 0..count {
                enclosure.add_animal(&lion(&format!("Lion {}", i))).unwrap();
            }

            let mut copy = enclosure.animals();
            for i in 0..extra {
                copy.push(lion(&format!("Stray {}", i)));
            }
            copy.truncate(count / 2);

            prop_assert_eq!(enclosure.animal_count(), count);
            prop_assert_eq!(enclosure.animals().len(), count);
        }

        #[test]
        fn prop_degrade_never_below_zero(
            start in 0.0f64..=100.0,
            amounts in prop::collection::vec(0.0f64..=100.0, 1..20)
        ) {
            let mut enclosure =
                Enclosure::with_cleanliness("Small", "Desert", AnimalKind::Reptile, start).unwrap();

            for amount in amounts {
                let before = enclosure.cleanliness_level();
                enclosure.degrade_cleanliness(amount).unwrap();
                let after = enclosure.cleanliness_level();

                prop_assert!(after >= 0.0);
                prop_assert!(after <= before);
            }
        }
    }
}
