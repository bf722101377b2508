use std::fmt;

/// Records with an age strictly greater than this are adults.
pub const ADULT_AGE: u32 = 18;

/// Immutable person record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: String,
    age: u32,
    country: String,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32, country: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            age,
            country: country.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn is_adult(&self) -> bool {
        self.age > ADULT_AGE
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person {{ name: {}, age: {}, country: {} }}",
            self.name, self.age, self.country
        )
    }
}

/// The fixed roster every demonstration runs over.
pub fn roster() -> Vec<Person> {
    vec![
        Person::new("Alan", 44, "US"),
        Person::new("Bruce", 17, "US"),
        Person::new("Crane", 19, "UK"),
        Person::new("Dolly", 15, "CN"),
        Person::new("Ella", 31, "FR"),
    ]
}
