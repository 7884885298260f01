// 🦁 Zoo Demo - Walk through a zoo roster end to end
//
// Usage: zoo-demo [roster.json]
// Without a path the built-in demo roster is used.

use anyhow::{Context, Result};
use std::env;

use zoo_registry::{
    roster, telemetry, Animal, AnimalKind, AnimalRef, Behavior, Duties, Enclosure, EnclosureRef,
    HealthRecord, Shared, StaffKind, Zoo,
};

const DEMO_ROSTER: &str = include_str!("../data/demo_roster.json");
const BANNER_WIDTH: usize = 70;

fn main() -> Result<()> {
    telemetry::init_logging();

    let mut zoo = match env::args().nth(1) {
        Some(path) => roster::load_zoo_file(&path)?,
        None => roster::load_zoo_str(DEMO_ROSTER).context("Built-in demo roster is invalid")?,
    };

    section("🦁 Zoo Loaded");
    println!("✓ {}", zoo.name());
    println!("  Animals: {}", zoo.animals().len());
    println!("  Enclosures: {}", zoo.enclosures().len());
    println!("  Staff: {}", zoo.staff().len());

    show_behaviour(&zoo);
    show_category_check(&mut zoo);
    run_staff_rounds(&zoo);
    show_critical_restrictions(&mut zoo);
    run_maintenance(&zoo);
    show_duties(&zoo);
    show_search(&zoo);

    section("📋 Zoo Report");
    print!("{}", zoo.generate_report());

    show_validation();
    show_statistics(&zoo);

    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(BANNER_WIDTH));
    println!("{}", title);
    println!("{}", "━".repeat(BANNER_WIDTH));
}

fn report<E: std::fmt::Display>(result: Result<String, E>) {
    match result {
        Ok(message) => println!("✓ {}", message),
        Err(e) => println!("✗ Error: {}", e),
    }
}

fn show_behaviour(zoo: &Zoo) {
    section("🐾 Animal Behaviour");

    for animal in zoo.animals() {
        let a = animal.read();
        println!("  {}", a.eat());
        println!("  {}", a.sleep());
        println!("  {}", a.make_sound());
    }
}

/// Offer the first animal to an enclosure built for another category
fn show_category_check(zoo: &mut Zoo) {
    section("🚧 Category Check");

    let Some(animal) = zoo.animals().into_iter().next() else {
        println!("  No animals to place.");
        return;
    };
    let kind = animal.read().kind();
    let mismatched = zoo
        .enclosures()
        .into_iter()
        .find(|e| e.read().animal_type() != kind);

    match mismatched {
        Some(enclosure) => report(zoo.assign_animal_to_enclosure(&animal, &enclosure)),
        None => println!("  Every enclosure accepts {}s.", kind),
    }
}

fn run_staff_rounds(zoo: &Zoo) {
    section("🧹 Staff Rounds");

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    for member in zoo.staff() {
        let (name, kind) = {
            let s = member.read();
            (s.name().to_string(), s.kind())
        };
        let animals = member.read().assigned_animals();
        let enclosures = member.read().assigned_enclosures();
        println!("\n--- {} ({}) ---", name, kind);

        match kind {
            StaffKind::Zookeeper => {
                for animal in &animals {
                    report(member.read().feed_animal(animal));
                }
                for enclosure in &enclosures {
                    report(member.read().clean_enclosure(enclosure));
                }
            }
            StaffKind::Veterinarian => {
                for animal in &animals {
                    report(member.read().conduct_health_check(animal));
                    match HealthRecord::new("Routine checkup", today.as_str(), "low", "All clear") {
                        Ok(record) => report(member.read().update_health_record(animal, record)),
                        Err(e) => println!("✗ Error: {}", e),
                    }
                }
            }
        }
    }
}

/// Try to move every critically ill animal into a fresh enclosure of its own kind
fn show_critical_restrictions(zoo: &mut Zoo) {
    section("🚑 Critical Health Restrictions");

    let critical = zoo.list_animals_with_critical_health();
    if critical.is_empty() {
        println!("  No animals with critical health issues.");
        return;
    }

    for animal in critical {
        let (kind, environment) = {
            let a = animal.read();
            for record in a.display_health_records() {
                println!("  {}: {}", a.name(), record.summary());
            }
            (a.kind(), a.environment().to_string())
        };

        let ward: EnclosureRef = match Enclosure::new("Large", environment, kind) {
            Ok(enclosure) => Shared::new(enclosure),
            Err(e) => {
                println!("✗ Error: {}", e);
                continue;
            }
        };
        report(zoo.add_enclosure(&ward));
        report(zoo.assign_animal_to_enclosure(&animal, &ward));
        report(zoo.remove_enclosure(&ward));
    }
}

fn run_maintenance(zoo: &Zoo) {
    section("🧽 Enclosure Maintenance");

    for enclosure in zoo.enclosures() {
        report(enclosure.write().degrade_cleanliness(15.0));
    }
    for enclosure in zoo.enclosures() {
        println!("{}", enclosure.read().report_status());
    }
}

fn show_duties(zoo: &Zoo) {
    section("📝 Daily Duties");

    for member in zoo.staff() {
        println!("{}\n", member.read().perform_duties());
    }
}

fn show_search(zoo: &Zoo) {
    section("🔍 Search");

    let first: Option<AnimalRef> = zoo.animals().into_iter().next();
    let Some(first) = first else {
        println!("  No animals to search for.");
        return;
    };
    let (name, species) = {
        let a = first.read();
        (a.name().to_uppercase(), a.species().to_string())
    };

    match zoo.find_animal_by_name(&name) {
        Ok(found) => println!("✓ Found \"{}\": {}", name, found.read().name()),
        Err(e) => println!("✗ Error: {}", e),
    }

    if let Ok(same_species) = zoo.list_animals_by_species(&species) {
        println!("{} in the zoo: {}", species, same_species.len());
        for animal in same_species {
            println!("  - {}", animal.read().name());
        }
    }

    if let Err(e) = zoo.find_animal_by_name("Nobody") {
        println!("✗ Error: {}", e);
    }
}

fn show_validation() {
    section("🛡️  Validation");

    let attempts = [
        Animal::mammal("", "Lion", -5, "Carnivore", "Savannah", "Roar", "Golden", "Warm-blooded")
            .map(|a| a.to_string()),
        Enclosure::with_cleanliness("Large", "Savannah", AnimalKind::Mammal, 150.0)
            .map(|e| e.to_string()),
        HealthRecord::new("Issue", "2025-11-10", "super critical", "Treatment").map(|r| r.summary()),
    ];

    for attempt in attempts {
        report(attempt);
    }
}

fn show_statistics(zoo: &Zoo) {
    section("📊 Final Statistics");

    println!("  Animals: {}", zoo.animals().len());
    println!("  Enclosures: {}", zoo.enclosures().len());
    println!("  Staff: {}", zoo.staff().len());
    println!(
        "  Animals with critical health: {}",
        zoo.list_animals_with_critical_health().len()
    );
}
