use crate::models::{Dog, DogKind, Timestamp};

/// Dogs present at startup.
pub fn seed_dogs() -> Vec<Dog> {
    vec![
        Dog::new("Bob", 0, DogKind::Terrier),
        Dog::new("Marli", 1, DogKind::Bulldog),
        Dog::new("Snoopy", 2, DogKind::Dalmatian),
        Dog::new("Rex", 3, DogKind::Dalmatian),
        Dog::new("Pongo", 4, DogKind::Dalmatian),
        Dog::new("Tillman", 5, DogKind::Bulldog),
        Dog::new("Uga", 6, DogKind::Bulldog),
    ]
}

/// Post-log entries present at startup.
pub fn seed_posts() -> Vec<Timestamp> {
    vec![
        Timestamp { id: 0, timestamp: 12 },
        Timestamp { id: 1, timestamp: 10 },
    ]
}
