// 🧑‍🔧 Staff Entity - Zookeepers and veterinarians
//
// A staff member holds two capacity-bounded lists of handles:
// up to 20 animals and up to 10 enclosures. Assignment does not move or
// own anything; it only records who looks after what.
//
// Identity is the staff ID alone (a Zookeeper and a Veterinarian with the
// same ID compare equal).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::health_record::HealthRecord;
use super::{AnimalRef, EnclosureRef};
use crate::error::{ZooError, ZooResult};
use crate::validation::require_text;

// ============================================================================
// STAFF KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffKind {
    /// Feeds assigned animals, cleans assigned enclosures
    Zookeeper,

    /// Checks assigned animals, files their health records
    Veterinarian,
}

impl StaffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffKind::Zookeeper => "Zookeeper",
            StaffKind::Veterinarian => "Veterinarian",
        }
    }
}

impl FromStr for StaffKind {
    type Err = ZooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zookeeper" => Ok(StaffKind::Zookeeper),
            "veterinarian" => Ok(StaffKind::Veterinarian),
            _ => Err(ZooError::type_violation(format!(
                "Staff kind must be Zookeeper or Veterinarian (got '{}').",
                s
            ))),
        }
    }
}

impl fmt::Display for StaffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every kind of staff member can summarise its day
pub trait Duties {
    fn perform_duties(&self) -> String;
}

// ============================================================================
// STAFF ENTITY
// ============================================================================

#[derive(Debug)]
pub struct Staff {
    name: String,

    /// Identity - read-only after construction
    staff_id: i64,

    role: String,
    kind: StaffKind,

    assigned_animals: Vec<AnimalRef>,
    assigned_enclosures: Vec<EnclosureRef>,
}

impl Staff {
    pub const MAX_ANIMALS_PER_STAFF: usize = 20;
    pub const MAX_ENCLOSURES_PER_STAFF: usize = 10;

    pub fn new(
        name: impl Into<String>,
        staff_id: i64,
        role: impl Into<String>,
        kind: StaffKind,
    ) -> ZooResult<Self> {
        Ok(Staff {
            name: require_text(name, "Name")?,
            staff_id,
            role: require_text(role, "Role")?,
            kind,
            assigned_animals: Vec::new(),
            assigned_enclosures: Vec::new(),
        })
    }

    /// Zookeeper with role "Zookeeper"
    pub fn zookeeper(name: impl Into<String>, staff_id: i64) -> ZooResult<Self> {
        Staff::new(name, staff_id, StaffKind::Zookeeper.as_str(), StaffKind::Zookeeper)
    }

    /// Veterinarian with role "Veterinarian"
    pub fn veterinarian(name: impl Into<String>, staff_id: i64) -> ZooResult<Self> {
        Staff::new(name, staff_id, StaffKind::Veterinarian.as_str(), StaffKind::Veterinarian)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn staff_id(&self) -> i64 {
        self.staff_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn kind(&self) -> StaffKind {
        self.kind
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ZooResult<()> {
        self.name = require_text(name, "Name")?;
        Ok(())
    }

    pub fn set_role(&mut self, role: impl Into<String>) -> ZooResult<()> {
        self.role = require_text(role, "Role")?;
        Ok(())
    }

    /// Copy of the assigned animal handles
    pub fn assigned_animals(&self) -> Vec<AnimalRef> {
        self.assigned_animals.clone()
    }

    /// Copy of the assigned enclosure handles
    pub fn assigned_enclosures(&self) -> Vec<EnclosureRef> {
        self.assigned_enclosures.clone()
    }

    pub fn is_assigned_animal(&self, animal: &AnimalRef) -> bool {
        self.assigned_animals.iter().any(|held| held == animal)
    }

    pub fn is_assigned_enclosure(&self, enclosure: &EnclosureRef) -> bool {
        self.assigned_enclosures.iter().any(|held| held == enclosure)
    }

    // ========================================================================
    // ASSIGNMENTS
    // ========================================================================

    pub fn assign_animal(&mut self, animal: &AnimalRef) -> ZooResult<String> {
        let label = animal_label(animal);

        if self.is_assigned_animal(animal) {
            return Err(ZooError::value_violation(format!("{} is already assigned.", label)));
        }
        if self.assigned_animals.len() >= Self::MAX_ANIMALS_PER_STAFF {
            return Err(ZooError::value_violation(
                "Cannot assign more animals to this staff member.",
            ));
        }

        self.assigned_animals.push(animal.clone());
        debug!(staff_id = self.staff_id, animal = %label, "animal assigned");
        Ok(format!("{} has been assigned to {}.", label, self.name))
    }

    pub fn assign_enclosure(&mut self, enclosure: &EnclosureRef) -> ZooResult<String> {
        let environment = enclosure.read().environmental_type().to_string();

        if self.is_assigned_enclosure(enclosure) {
            return Err(ZooError::value_violation(format!(
                "{} enclosure is already assigned.",
                environment
            )));
        }
        if self.assigned_enclosures.len() >= Self::MAX_ENCLOSURES_PER_STAFF {
            return Err(ZooError::value_violation(
                "Cannot assign more enclosures to this staff member.",
            ));
        }

        self.assigned_enclosures.push(enclosure.clone());
        debug!(staff_id = self.staff_id, enclosure = %environment, "enclosure assigned");
        Ok(format!("{} enclosure has been assigned to {}.", environment, self.name))
    }

    pub(crate) fn detach_animal(&mut self, animal: &AnimalRef) -> usize {
        let before = self.assigned_animals.len();
        self.assigned_animals.retain(|held| held != animal);
        before - self.assigned_animals.len()
    }

    pub(crate) fn detach_enclosure(&mut self, enclosure: &EnclosureRef) -> usize {
        let before = self.assigned_enclosures.len();
        self.assigned_enclosures.retain(|held| held != enclosure);
        before - self.assigned_enclosures.len()
    }

    // ========================================================================
    // KIND-SPECIFIC DUTIES
    // ========================================================================

    fn require_kind(&self, kind: StaffKind, duty: &str) -> ZooResult<()> {
        if self.kind != kind {
            return Err(ZooError::type_violation(format!(
                "{} is a {}; only a {} can {}.",
                self.name, self.kind, kind, duty
            )));
        }
        Ok(())
    }

    fn require_assigned_animal(&self, animal: &AnimalRef) -> ZooResult<String> {
        let label = animal_label(animal);
        if !self.is_assigned_animal(animal) {
            return Err(ZooError::value_violation(format!(
                "{} is not assigned to {}.",
                label, self.name
            )));
        }
        Ok(label)
    }

    /// Zookeeper only: feed an assigned animal
    pub fn feed_animal(&self, animal: &AnimalRef) -> ZooResult<String> {
        self.require_kind(StaffKind::Zookeeper, "feed animals")?;
        let label = self.require_assigned_animal(animal)?;

        Ok(format!("{} ({}) feeds {}.", self.name, self.role, label))
    }

    /// Zookeeper only: clean an assigned enclosure (delegates to the enclosure)
    pub fn clean_enclosure(&self, enclosure: &EnclosureRef) -> ZooResult<String> {
        self.require_kind(StaffKind::Zookeeper, "clean enclosures")?;

        let environment = enclosure.read().environmental_type().to_string();
        if !self.is_assigned_enclosure(enclosure) {
            return Err(ZooError::value_violation(format!(
                "{} enclosure is not assigned to {}.",
                environment, self.name
            )));
        }

        let result = enclosure.write().clean_enclosure();
        Ok(format!(
            "{} ({}) cleaned the {} enclosure. {}",
            self.name, self.role, environment, result
        ))
    }

    /// Veterinarian only: examine an assigned animal
    pub fn conduct_health_check(&self, animal: &AnimalRef) -> ZooResult<String> {
        self.require_kind(StaffKind::Veterinarian, "conduct health checks")?;
        let label = self.require_assigned_animal(animal)?;

        Ok(format!(
            "{} ({}) conducted a health check on {}.",
            self.name, self.role, label
        ))
    }

    /// Veterinarian only: file a record on an assigned animal
    ///
    /// Forwards the animal's own result, including the "already exists" no-op.
    pub fn update_health_record(&self, animal: &AnimalRef, record: HealthRecord) -> ZooResult<String> {
        self.require_kind(StaffKind::Veterinarian, "update health records")?;
        self.require_assigned_animal(animal)?;

        let result = animal.write().add_health_record(record);
        Ok(format!("{} ({}) {}", self.name, self.role, result))
    }
}

/// "Simba the Lion"
fn animal_label(animal: &AnimalRef) -> String {
    let a = animal.read();
    format!("{} the {}", a.name(), a.species())
}

fn list_or_none(items: Vec<String>, separator: &str) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(separator)
    }
}

impl Staff {
    /// "Simba (Lion), Kaa (Python)" or "None"
    fn animal_list(&self) -> String {
        list_or_none(
            self.assigned_animals
                .iter()
                .map(|a| {
                    let a = a.read();
                    format!("{} ({})", a.name(), a.species())
                })
                .collect(),
            ", ",
        )
    }

    /// "Savannah enclosure, Jungle enclosure" or "None"
    fn enclosure_list(&self) -> String {
        list_or_none(
            self.assigned_enclosures
                .iter()
                .map(|e| format!("{} enclosure", e.read().environmental_type()))
                .collect(),
            ", ",
        )
    }
}

impl Duties for Staff {
    fn perform_duties(&self) -> String {
        match self.kind {
            StaffKind::Zookeeper => format!(
                "{} ({}) performed duties.\nFeed Animals: {}\nCleaning Enclosures: {}\n",
                self.name,
                self.role,
                self.animal_list(),
                self.enclosure_list()
            ),
            StaffKind::Veterinarian => {
                let records: Vec<String> = self
                    .assigned_animals
                    .iter()
                    .flat_map(|a| {
                        let a = a.read();
                        let lines: Vec<String> = a
                            .display_health_records()
                            .iter()
                            .map(|r| format!("{}: {}", a.name(), r.summary()))
                            .collect();
                        lines
                    })
                    .collect();

                format!(
                    "{} ({}) performed duties.\nAnimals Checked: {}\nHealth Records Updated: {}\n",
                    self.name,
                    self.role,
                    self.animal_list(),
                    list_or_none(records, "; ")
                )
            }
        }
    }
}

impl PartialEq for Staff {
    fn eq(&self, other: &Self) -> bool {
        self.staff_id == other.staff_id
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Staff Name: {}", self.name)?;
        writeln!(f, "Staff ID: {}", self.staff_id)?;
        writeln!(f, "Role: {}", self.role)?;
        writeln!(f, "Assigned Animals: {}", self.animal_list())?;
        writeln!(f, "Assigned Enclosures: {}", self.enclosure_list())
    }
}

// ============================================================================
// TESTS
// ============================================================================
