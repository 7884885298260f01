// Entity Models
//
// Each entity validates its own fields on construction and in every setter.
// Relationships (enclosure → animals, staff → animals/enclosures) are
// `Shared` handles onto entities the zoo registry holds.

pub mod animal;
pub mod enclosure;
pub mod health_record;
pub mod staff;

use crate::shared::Shared;

pub use animal::{Animal, AnimalKind, AnimalTraits, Behavior};
pub use enclosure::Enclosure;
pub use health_record::{HealthRecord, Severity};
pub use staff::{Duties, Staff, StaffKind};

/// Handle onto an animal held by the zoo
pub type AnimalRef = Shared<Animal>;

/// Handle onto an enclosure held by the zoo
pub type EnclosureRef = Shared<Enclosure>;

/// Handle onto a staff member held by the zoo
pub type StaffRef = Shared<Staff>;
