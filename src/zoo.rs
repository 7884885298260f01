// 🏛️ Zoo Registry - The one place cross-entity rules are enforced
//
// The zoo holds three ordered registries (animals, enclosures, staff) and
// is the only component that checks rules spanning them:
//
// - an enclosure with animals in it cannot be removed
// - an animal can only be placed in an enclosure when both are registered,
//   the category and environment match, and it has no critical health issue
//
// Removing an animal or enclosure from the zoo also drops it from every
// enclosure and staff assignment list the zoo holds, so no registered
// entity keeps pointing at something the zoo no longer has.

use std::fmt;
use tracing::{info, warn};

use crate::entities::{AnimalRef, EnclosureRef, StaffRef};
use crate::error::{ZooError, ZooResult};
use crate::validation::require_text;

const REPORT_WIDTH: usize = 60;

// ============================================================================
// ZOO
// ============================================================================

#[derive(Debug)]
pub struct Zoo {
    name: String,

    /// Registries - insertion order, no two equal entries
    animals: Vec<AnimalRef>,
    enclosures: Vec<EnclosureRef>,
    staff: Vec<StaffRef>,
}

impl Zoo {
    pub fn new(name: impl Into<String>) -> ZooResult<Self> {
        Ok(Zoo {
            name: require_text(name, "Name")?,
            animals: Vec::new(),
            enclosures: Vec::new(),
            staff: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ZooResult<()> {
        self.name = require_text(name, "Name")?;
        Ok(())
    }

    pub fn animals(&self) -> Vec<AnimalRef> {
        self.animals.clone()
    }

    pub fn enclosures(&self) -> Vec<EnclosureRef> {
        self.enclosures.clone()
    }

    pub fn staff(&self) -> Vec<StaffRef> {
        self.staff.clone()
    }

    pub fn has_animal(&self, animal: &AnimalRef) -> bool {
        self.animals.contains(animal)
    }

    pub fn has_enclosure(&self, enclosure: &EnclosureRef) -> bool {
        self.enclosures.contains(enclosure)
    }

    pub fn has_staff(&self, member: &StaffRef) -> bool {
        self.staff.contains(member)
    }

    // ========================================================================
    // ANIMALS
    // ========================================================================

    pub fn add_animal(&mut self, animal: &AnimalRef) -> ZooResult<String> {
        let label = animal_label(animal);

        if self.has_animal(animal) {
            return Err(ZooError::value_violation(format!("{} is already in the zoo.", label)));
        }

        self.animals.push(animal.clone());
        info!(zoo = %self.name, animal = %label, "animal registered");
        Ok(format!("{} has been added to the zoo.", label))
    }

    /// Unregister an animal and drop it from the zoo's enclosures and staff lists
    pub fn remove_animal(&mut self, animal: &AnimalRef) -> ZooResult<String> {
        let label = animal_label(animal);

        let position = self
            .animals
            .iter()
            .position(|held| held == animal)
            .ok_or_else(|| ZooError::value_violation(format!("{} is not in the zoo.", label)))?;
        self.animals.remove(position);

        let evacuated: usize = self
            .enclosures
            .iter()
            .map(|e| e.write().detach_animal(animal))
            .sum();
        let unassigned: usize = self
            .staff
            .iter()
            .map(|s| s.write().detach_animal(animal))
            .sum();

        info!(zoo = %self.name, animal = %label, evacuated, unassigned, "animal removed");
        Ok(format!("{} has been removed from the zoo.", label))
    }

    /// First animal whose name matches, ignoring case
    pub fn find_animal_by_name(&self, name: &str) -> ZooResult<AnimalRef> {
        let name = require_text(name, "Name")?;
        let wanted = name.to_lowercase();

        self.animals
            .iter()
            .find(|a| a.read().name().to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| {
                ZooError::value_violation(format!("No animal named \"{}\" found in the zoo.", name))
            })
    }

    pub fn list_animals_with_critical_health(&self) -> Vec<AnimalRef> {
        self.animals
            .iter()
            .filter(|a| a.read().has_critical_health_issues())
            .cloned()
            .collect()
    }

    /// Animals of a species, ignoring case
    pub fn list_animals_by_species(&self, species: &str) -> ZooResult<Vec<AnimalRef>> {
        let wanted = require_text(species, "Species")?.to_lowercase();

        Ok(self
            .animals
            .iter()
            .filter(|a| a.read().species().to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    // ========================================================================
    // ENCLOSURES
    // ========================================================================

    pub fn add_enclosure(&mut self, enclosure: &EnclosureRef) -> ZooResult<String> {
        let environment = enclosure.read().environmental_type().to_string();

        if self.has_enclosure(enclosure) {
            return Err(ZooError::value_violation(format!(
                "{} enclosure is already in the zoo.",
                environment
            )));
        }

        self.enclosures.push(enclosure.clone());
        info!(zoo = %self.name, enclosure = %environment, "enclosure registered");
        Ok(format!("{} enclosure has been added to the zoo.", environment))
    }

    /// Unregister an empty enclosure; animals must be moved out first
    pub fn remove_enclosure(&mut self, enclosure: &EnclosureRef) -> ZooResult<String> {
        let (environment, occupants) = {
            let e = enclosure.read();
            (e.environmental_type().to_string(), e.animal_count())
        };

        let position = self
            .enclosures
            .iter()
            .position(|held| held == enclosure)
            .ok_or_else(|| {
                ZooError::value_violation(format!("{} enclosure is not in the zoo.", environment))
            })?;

        if occupants > 0 {
            warn!(zoo = %self.name, enclosure = %environment, occupants, "refused to remove occupied enclosure");
            return Err(ZooError::value_violation(format!(
                "Cannot remove enclosure: it still contains {} animal(s).",
                occupants
            )));
        }

        self.enclosures.remove(position);
        let unassigned: usize = self
            .staff
            .iter()
            .map(|s| s.write().detach_enclosure(enclosure))
            .sum();

        info!(zoo = %self.name, enclosure = %environment, unassigned, "enclosure removed");
        Ok(format!("{} enclosure has been removed from the zoo.", environment))
    }

    /// Place a registered animal in a registered enclosure
    ///
    /// Unregistered animal/enclosure or critical health → value violation.
    /// Category (type violation), duplicate and environment checks are the
    /// enclosure's own and run last.
    pub fn assign_animal_to_enclosure(
        &mut self,
        animal: &AnimalRef,
        enclosure: &EnclosureRef,
    ) -> ZooResult<String> {
        let (name, movable) = {
            let a = animal.read();
            (a.name().to_string(), a.can_be_moved())
        };
        let environment = enclosure.read().environmental_type().to_string();

        if !self.has_animal(animal) {
            return Err(ZooError::value_violation(format!(
                "{} is not in the zoo. Add the animal first.",
                name
            )));
        }
        if !self.has_enclosure(enclosure) {
            return Err(ZooError::value_violation(format!(
                "{} enclosure is not in the zoo. Add the enclosure first.",
                environment
            )));
        }
        if !movable {
            warn!(zoo = %self.name, animal = %name, "refused to move animal with critical health issues");
            return Err(ZooError::value_violation(format!(
                "{} has critical health issues and cannot be moved.",
                name
            )));
        }

        let result = enclosure.write().add_animal(animal)?;
        info!(zoo = %self.name, animal = %name, enclosure = %environment, "animal placed in enclosure");
        Ok(format!("{} assigned to {} enclosure. {}", name, environment, result))
    }

    // ========================================================================
    // STAFF
    // ========================================================================

    pub fn add_staff(&mut self, member: &StaffRef) -> ZooResult<String> {
        let (name, staff_id, role) = staff_summary(member);

        if self.has_staff(member) {
            return Err(ZooError::value_violation(format!(
                "{} (ID: {}) is already in the zoo.",
                name, staff_id
            )));
        }

        self.staff.push(member.clone());
        info!(zoo = %self.name, staff = %name, staff_id, "staff member registered");
        Ok(format!("{} ({}) has been added to the zoo staff.", name, role))
    }

    pub fn remove_staff(&mut self, member: &StaffRef) -> ZooResult<String> {
        let (name, staff_id, role) = staff_summary(member);

        let position = self
            .staff
            .iter()
            .position(|held| held == member)
            .ok_or_else(|| ZooError::value_violation(format!("{} is not in the zoo staff.", name)))?;
        self.staff.remove(position);

        info!(zoo = %self.name, staff = %name, staff_id, "staff member removed");
        Ok(format!("{} ({}) has been removed from the zoo staff.", name, role))
    }

    // ========================================================================
    // REPORT
    // ========================================================================

    /// Multi-section summary of animals, enclosures and staff
    pub fn generate_report(&self) -> String {
        self.to_string()
    }
}

fn animal_label(animal: &AnimalRef) -> String {
    let a = animal.read();
    format!("{} the {}", a.name(), a.species())
}

fn staff_summary(member: &StaffRef) -> (String, i64, String) {
    let s = member.read();
    (s.name().to_string(), s.staff_id(), s.role().to_string())
}

impl fmt::Display for Zoo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(REPORT_WIDTH);
        let light = "-".repeat(REPORT_WIDTH);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "{} - Zoo Report", self.name)?;
        writeln!(f, "{}", heavy)?;
        writeln!(f)?;

        writeln!(f, "ANIMALS ({}):", self.animals.len())?;
        writeln!(f, "{}", light)?;
        if self.animals.is_empty() {
            writeln!(f, "  No animals in the zoo.")?;
        }
        for animal in &self.animals {
            let a = animal.read();
            writeln!(
                f,
                "  - {} ({}), Age: {}, Diet: {}, Environment: {}",
                a.name(),
                a.species(),
                a.age(),
                a.dietary_needs(),
                a.environment()
            )?;
            if a.has_critical_health_issues() {
                writeln!(f, "    !!  CRITICAL HEALTH ISSUES - Cannot be moved")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "ENCLOSURES ({}):", self.enclosures.len())?;
        writeln!(f, "{}", light)?;
        if self.enclosures.is_empty() {
            writeln!(f, "  No enclosures in the zoo.")?;
        }
        for enclosure in &self.enclosures {
            let e = enclosure.read();
            writeln!(
                f,
                "  - {} ({}), Type: {}, Cleanliness: {}%, Animals: {}",
                e.environmental_type(),
                e.size(),
                e.animal_type(),
                e.cleanliness_level(),
                e.animal_count()
            )?;
        }
        writeln!(f)?;

        writeln!(f, "STAFF ({}):", self.staff.len())?;
        writeln!(f, "{}", light)?;
        if self.staff.is_empty() {
            writeln!(f, "  No staff members in the zoo.")?;
        }
        for member in &self.staff {
            let s = member.read();
            writeln!(
                f,
                "  - {} (ID: {}), Role: {}, Animals: {}, Enclosures: {}",
                s.name(),
                s.staff_id(),
                s.role(),
                s.assigned_animals().len(),
                s.assigned_enclosures().len()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", heavy)
    }
}

// ============================================================================
// TESTS
// ============================================================================
