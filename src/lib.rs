// Zoo Registry - Core Library
// Entity models, the zoo registry and roster loading, for the demo binary and tests

pub mod error;
pub mod validation;
pub mod shared;
pub mod entities;
pub mod zoo;
pub mod roster;     // JSON roster loading
pub mod telemetry;  // tracing subscriber setup

// Re-export commonly used types
pub use error::{ErrorKind, ZooError, ZooResult};
pub use shared::Shared;
pub use entities::{
    Animal, AnimalKind, AnimalTraits, Behavior,
    Enclosure,
    HealthRecord, Severity,
    Staff, StaffKind, Duties,
    AnimalRef, EnclosureRef, StaffRef,
};
pub use zoo::Zoo;
pub use roster::{load_zoo, load_zoo_file, load_zoo_str};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
