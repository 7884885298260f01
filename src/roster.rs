// 📋 Roster - Build a whole zoo from a JSON document
//
// Roster documents are dynamically typed, so every field goes through two
// checks in order: the JSON type (type violation) and then the entity's own
// value validation (value violation). Entities are built with their
// validated constructors and relations through the zoo/staff operations,
// so a roster cannot produce a state the API would refuse.
//
// Animals are referenced by name, case-insensitively; a name shared by two
// animals cannot be referenced. Loading stops at the first violation.

use anyhow::{Context as AnyhowContext, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::entities::{
    Animal, AnimalKind, AnimalRef, Enclosure, EnclosureRef, HealthRecord, Staff, StaffKind,
};
use crate::error::{ZooError, ZooResult};
use crate::shared::Shared;
use crate::zoo::Zoo;

type Object = Map<String, Value>;

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Read and build a roster file
pub fn load_zoo_file<P: AsRef<Path>>(path: P) -> Result<Zoo> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read roster file: {:?}", path.as_ref()))?;

    load_zoo_str(&content)
        .with_context(|| format!("Failed to load roster file: {:?}", path.as_ref()))
}

/// Parse and build a roster held in memory
pub fn load_zoo_str(content: &str) -> Result<Zoo> {
    let document: Value = serde_json::from_str(content).context("Failed to parse roster JSON")?;
    let zoo = load_zoo(&document)?;
    Ok(zoo)
}

/// Build a zoo from an already parsed roster document
pub fn load_zoo(document: &Value) -> ZooResult<Zoo> {
    let root = object(document, "Roster")?;
    let mut zoo = Zoo::new(text(root, "name", "Name")?)?;

    for entry in list(root, "animals", "Animals")? {
        let animal = Shared::new(animal(object(entry, "Animal entry")?)?);
        zoo.add_animal(&animal)?;
    }

    let mut enclosures: Vec<EnclosureRef> = Vec::new();
    for entry in list(root, "enclosures", "Enclosures")? {
        let fields = object(entry, "Enclosure entry")?;
        let enclosure = Shared::new(enclosure(fields)?);
        zoo.add_enclosure(&enclosure)?;

        for name in list(fields, "animals", "Enclosure animals")? {
            let resident = named_animal(&zoo, name)?;
            zoo.assign_animal_to_enclosure(&resident, &enclosure)?;
        }
        enclosures.push(enclosure);
    }

    for entry in list(root, "staff", "Staff")? {
        let fields = object(entry, "Staff entry")?;
        let member = Shared::new(staff(fields)?);
        zoo.add_staff(&member)?;

        for name in list(fields, "animals", "Staff animals")? {
            let animal = named_animal(&zoo, name)?;
            member.write().assign_animal(&animal)?;
        }
        for index in list(fields, "enclosures", "Staff enclosures")? {
            let enclosure = indexed_enclosure(&enclosures, index)?;
            member.write().assign_enclosure(enclosure)?;
        }
    }

    info!(
        zoo = %zoo.name(),
        animals = zoo.animals().len(),
        enclosures = zoo.enclosures().len(),
        staff = zoo.staff().len(),
        "roster loaded"
    );
    Ok(zoo)
}

// ============================================================================
// ENTITIES
// ============================================================================

fn animal(fields: &Object) -> ZooResult<Animal> {
    let kind = AnimalKind::from_str(&text(fields, "kind", "Animal kind")?)?;

    let name = text(fields, "name", "Name")?;
    let species = text(fields, "species", "Species")?;
    let age = integer(fields, "age", "Age")?;
    let dietary_needs = text(fields, "dietary_needs", "Dietary needs")?;
    let environment = text(fields, "environment", "Environment")?;
    let sound = text(fields, "sound", "Sound")?;
    let blood_type = text(fields, "blood_type", "Blood type")?;

    let mut animal = match kind {
        AnimalKind::Mammal => Animal::mammal(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            text(fields, "hair_type", "Hair type")?,
            blood_type,
        )?,
        AnimalKind::Reptile => Animal::reptile(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            text(fields, "skin_type", "Skin type")?,
            blood_type,
            boolean(fields, "is_venomous", "Is Venomous")?,
        )?,
        AnimalKind::Bird => Animal::bird(
            name,
            species,
            age,
            dietary_needs,
            environment,
            sound,
            text(fields, "feather_type", "Feather type")?,
            blood_type,
            boolean(fields, "can_fly", "Can fly")?,
        )?,
    };

    for entry in list(fields, "health_records", "Health records")? {
        let record = health_record(object(entry, "Health record entry")?)?;
        animal.add_health_record(record);
    }

    debug!(animal = %animal.name(), kind = %kind, "roster animal built");
    Ok(animal)
}

fn health_record(fields: &Object) -> ZooResult<HealthRecord> {
    HealthRecord::new(
        text(fields, "issue", "Issue")?,
        text(fields, "date_reported", "Date")?,
        text(fields, "severity_level", "Severity level")?,
        text(fields, "treatment_plan", "Treatment plan")?,
    )
}

fn enclosure(fields: &Object) -> ZooResult<Enclosure> {
    let size = text(fields, "size", "Size")?;
    let environmental_type = text(fields, "environmental_type", "Environmental type")?;
    let animal_type = AnimalKind::from_str(&text(fields, "animal_type", "Animal type")?)?;

    match fields.get("cleanliness_level") {
        None | Some(Value::Null) => Enclosure::new(size, environmental_type, animal_type),
        Some(_) => Enclosure::with_cleanliness(
            size,
            environmental_type,
            animal_type,
            number(fields, "cleanliness_level", "Cleanliness level")?,
        ),
    }
}

fn staff(fields: &Object) -> ZooResult<Staff> {
    let kind = StaffKind::from_str(&text(fields, "kind", "Staff kind")?)?;
    let name = text(fields, "name", "Name")?;
    let staff_id = integer(fields, "staff_id", "Staff ID")?;

    let mut member = match kind {
        StaffKind::Zookeeper => Staff::zookeeper(name, staff_id)?,
        StaffKind::Veterinarian => Staff::veterinarian(name, staff_id)?,
    };

    if fields.contains_key("role") {
        member.set_role(text(fields, "role", "Role")?)?;
    }
    Ok(member)
}

// ============================================================================
// REFERENCES
// ============================================================================

fn named_animal(zoo: &Zoo, name: &Value) -> ZooResult<AnimalRef> {
    let name = name
        .as_str()
        .ok_or_else(|| ZooError::type_violation("Animal reference must be a string."))?;

    let wanted = name.to_lowercase();
    let matches = zoo
        .animals()
        .iter()
        .filter(|a| a.read().name().to_lowercase() == wanted)
        .count();
    if matches > 1 {
        return Err(ZooError::value_violation(format!(
            "Animal name \"{}\" is ambiguous in the roster.",
            name
        )));
    }

    zoo.find_animal_by_name(name)
}

fn indexed_enclosure<'a>(enclosures: &'a [EnclosureRef], index: &Value) -> ZooResult<&'a EnclosureRef> {
    let index = index.as_u64().ok_or_else(|| {
        ZooError::type_violation("Enclosure reference must be a non-negative integer.")
    })?;

    usize::try_from(index)
        .ok()
        .and_then(|i| enclosures.get(i))
        .ok_or_else(|| ZooError::value_violation(format!("No enclosure at index {} in the roster.", index)))
}

// ============================================================================
// FIELD EXTRACTORS - type checks only, values are the entities' business
// ============================================================================

fn object<'a>(value: &'a Value, label: &str) -> ZooResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| ZooError::type_violation(format!("{} must be an object.", label)))
}

fn text(fields: &Object, key: &str, label: &str) -> ZooResult<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ZooError::type_violation(format!("{} must be a string.", label)))
}

fn integer(fields: &Object, key: &str, label: &str) -> ZooResult<i64> {
    // serde_json keeps booleans apart from numbers, so true is not 1 here
    fields.get(key).and_then(Value::as_i64).ok_or_else(|| {
        ZooError::type_violation(format!("{} must be an integer (not bool or None).", label))
    })
}

fn boolean(fields: &Object, key: &str, label: &str) -> ZooResult<bool> {
    fields.get(key).and_then(Value::as_bool).ok_or_else(|| {
        ZooError::type_violation(format!("{} must be a boolean (True/False).", label))
    })
}

fn number(fields: &Object, key: &str, label: &str) -> ZooResult<f64> {
    fields
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ZooError::type_violation(format!("{} must be a number.", label)))
}

/// Optional array field; missing or null is an empty list
fn list<'a>(fields: &'a Object, key: &str, label: &str) -> ZooResult<&'a [Value]> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(Default::default()),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ZooError::type_violation(format!("{} must be a list.", label))),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lion() -> Value {
        json!({
            "kind": "Mammal",
            "name": "Simba",
            "species": "Lion",
            "age": 5,
            "dietary_needs": "Carnivore",
            "environment": "Savannah",
            "sound": "Roar",
            "hair_type": "Golden",
            "blood_type": "Warm-blooded"
        })
    }

    fn roster() -> Value {
        json!({
            "name": "City Zoo",
            "animals": [
                lion(),
                {
                    "kind": "Reptile",
                    "name": "Kaa",
                    "species": "Python",
                    "age": 10,
                    "dietary_needs": "Rodents",
                    "environment": "Jungle",
                    "sound": "Hiss",
                    "skin_type": "Scaly",
                    "blood_type": "Cold-blooded",
                    "is_venomous": false,
                    "health_records": [
                        {
                            "issue": "Shedding",
                            "date_reported": "2025-01-05",
                            "severity_level": "low",
                            "treatment_plan": "Humidity"
                        }
                    ]
                }
            ],
            "enclosures": [
                {
                    "size": "Large",
                    "environmental_type": "Savannah",
                    "animal_type": "Mammal",
                    "cleanliness_level": 80,
                    "animals": ["Simba"]
                },
                { "size": "Medium", "environmental_type": "Jungle", "animal_type": "Reptile" }
            ],
            "staff": [
                { "kind": "Zookeeper", "name": "Sam", "staff_id": 1, "animals": ["Simba"], "enclosures": [0] },
                { "kind": "Veterinarian", "name": "Dr. Lee", "staff_id": 2, "animals": ["kaa"] }
            ]
        })
    }

    #[test]
    fn test_load_full_roster() {
        let zoo = load_zoo(&roster()).unwrap();

        assert_eq!(zoo.name(), "City Zoo");
        assert_eq!(zoo.animals().len(), 2);
        assert_eq!(zoo.enclosures().len(), 2);
        assert_eq!(zoo.staff().len(), 2);

        let savannah = &zoo.enclosures()[0];
        assert_eq!(savannah.read().cleanliness_level(), 80.0);
        assert_eq!(savannah.read().animal_count(), 1);
        assert_eq!(zoo.enclosures()[1].read().cleanliness_level(), 100.0);

        let kaa = zoo.find_animal_by_name("Kaa").unwrap();
        assert_eq!(kaa.read().display_health_records().len(), 1);
        assert_eq!(kaa.read().is_venomous(), Ok(false));

        let keeper = &zoo.staff()[0];
        assert_eq!(keeper.read().assigned_animals().len(), 1);
        assert_eq!(keeper.read().assigned_enclosures().len(), 1);
        assert_eq!(zoo.staff()[1].read().kind(), StaffKind::Veterinarian);
    }

    #[test]
    fn test_wrong_json_types_are_type_violations() {
        let mut doc = roster();
        doc["animals"][0]["age"] = json!(true);
        let err = load_zoo(&doc).unwrap_err();
        assert!(err.is_type());
        assert_eq!(err.message(), "Age must be an integer (not bool or None).");

        let mut doc = roster();
        doc["animals"][1]["is_venomous"] = json!("no");
        assert_eq!(
            load_zoo(&doc).unwrap_err().message(),
            "Is Venomous must be a boolean (True/False)."
        );

        let mut doc = roster();
        doc["animals"][0]["name"] = json!(42);
        assert_eq!(load_zoo(&doc).unwrap_err().message(), "Name must be a string.");

        let mut doc = roster();
        doc["enclosures"][0]["cleanliness_level"] = json!("clean");
        assert!(load_zoo(&doc).unwrap_err().is_type());

        let mut doc = roster();
        doc["animals"][0]["kind"] = json!("Fish");
        assert!(load_zoo(&doc).unwrap_err().is_type());
    }

    #[test]
    fn test_type_checked_before_value() {
        // Null name is reported even though the age is out of range too
        let mut doc = roster();
        doc["animals"][0]["name"] = json!(null);
        doc["animals"][0]["age"] = json!(-1);
        assert!(load_zoo(&doc).unwrap_err().is_type());

        let mut doc = roster();
        doc["animals"][0]["age"] = json!(-1);
        let err = load_zoo(&doc).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Age cannot be negative.");
    }

    #[test]
    fn test_relations_go_through_zoo_rules() {
        let mut doc = roster();
        doc["enclosures"][1]["animals"] = json!(["Simba"]);
        // A lion in a reptile enclosure
        assert!(load_zoo(&doc).unwrap_err().is_type());

        let mut doc = roster();
        doc["enclosures"][0]["animals"] = json!(["Mufasa"]);
        assert_eq!(
            load_zoo(&doc).unwrap_err().message(),
            "No animal named \"Mufasa\" found in the zoo."
        );

        let mut doc = roster();
        doc["staff"][0]["enclosures"] = json!([7]);
        assert_eq!(
            load_zoo(&doc).unwrap_err().message(),
            "No enclosure at index 7 in the roster."
        );

        let mut doc = roster();
        doc["staff"][1]["staff_id"] = json!(1);
        assert!(load_zoo(&doc).unwrap_err().is_value());
    }

    #[test]
    fn test_ambiguous_animal_reference() {
        let mut doc = roster();
        let mut twin = lion();
        twin["name"] = json!("SIMBA");
        twin["age"] = json!(2);
        doc["animals"].as_array_mut().unwrap().push(twin);

        let err = load_zoo(&doc).unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.message(), "Animal name \"Simba\" is ambiguous in the roster.");

        // Unreferenced duplicates still load
        doc["enclosures"][0]["animals"] = json!([]);
        doc["staff"][0]["animals"] = json!([]);
        assert_eq!(load_zoo(&doc).unwrap().animals().len(), 3);
    }

    #[test]
    fn test_optional_role_override() {
        let mut doc = roster();
        doc["staff"][0]["role"] = json!("Head Keeper");
        let zoo = load_zoo(&doc).unwrap();
        assert_eq!(zoo.staff()[0].read().role(), "Head Keeper");
    }

    #[test]
    fn test_minimal_roster() {
        let zoo = load_zoo(&json!({ "name": "Tiny Zoo" })).unwrap();
        assert!(zoo.animals().is_empty());
        assert!(zoo.enclosures().is_empty());
        assert!(zoo.staff().is_empty());

        assert!(load_zoo(&json!([])).unwrap_err().is_type());
        assert!(load_zoo(&json!({ "name": "" })).unwrap_err().is_value());
        assert!(load_zoo(&json!({ "name": "Z", "animals": {} })).unwrap_err().is_type());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", roster()).unwrap();

        let zoo = load_zoo_file(file.path()).unwrap();
        assert_eq!(zoo.animals().len(), 2);
    }

    #[test]
    fn test_file_errors_carry_context() {
        let missing = load_zoo_file("/definitely/not/here.json").unwrap_err();
        assert!(missing.to_string().contains("Failed to read roster file"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let broken = load_zoo_file(file.path()).unwrap_err();
        assert!(format!("{:#}", broken).contains("Failed to parse roster JSON"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!({ "name": "Z", "animals": [{ "kind": "Mammal" }] })).unwrap();
        let invalid = load_zoo_file(file.path()).unwrap_err();
        let zoo_error = invalid.downcast_ref::<ZooError>().unwrap();
        assert!(zoo_error.is_type());
    }

    #[test]
    fn test_builtin_demo_roster_loads() {
        let zoo = load_zoo_str(include_str!("../data/demo_roster.json")).unwrap();
        assert!(!zoo.animals().is_empty());
        assert!(!zoo.list_animals_with_critical_health().is_empty());
    }
}
