//! The four collector demonstrations over the roster.

use std::collections::HashMap;

use tracing::info;

use crate::collector::{
    grouping_by, joining, mapping, partitioning_by, Collector, FnCollector, Partition,
};
use crate::person::Person;
use crate::report::render_sequence;
use crate::strategy::Strategy;

/// Results of one demo run, in print order.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub by_country: HashMap<String, Vec<Person>>,
    pub by_age: Partition<Vec<Person>>,
    pub joined_names: String,
    pub collected: Vec<Person>,
}

pub fn run(people: &[Person], strategy: Strategy) -> DemoReport {
    info!(records = people.len(), %strategy, "running collector demo");
    DemoReport {
        by_country: group_by_country(people),
        by_age: partition_by_age(people),
        joined_names: join_names(people),
        collected: collect_people(people, strategy),
    }
}

pub fn group_by_country(people: &[Person]) -> HashMap<String, Vec<Person>> {
    grouping_by(|p: &Person| p.country().to_string()).collect(people.iter().cloned())
}

/// `true` holds adults (age > 18), `false` everyone else.
pub fn partition_by_age(people: &[Person]) -> Partition<Vec<Person>> {
    partitioning_by(Person::is_adult).collect(people.iter().cloned())
}

pub fn join_names(people: &[Person]) -> String {
    mapping(Person::name, joining(", ")).collect(people.iter())
}

/// Copy of `people` built with a hand-written supplier, accumulator and
/// combiner. Each accumulate and combine step is logged.
pub fn people_collector(
) -> impl Collector<Person, Container = Vec<Person>, Output = Vec<Person>> + Sync {
    FnCollector::of(
        Vec::<Person>::new,
        |list: &mut Vec<Person>, person: Person| {
            info!(%person, "accumulator");
            list.push(person);
        },
        |mut left: Vec<Person>, mut right: Vec<Person>| {
            info!(left = %render_sequence(&left), "combiner");
            left.append(&mut right);
            left
        },
    )
}

pub fn collect_people(people: &[Person], strategy: Strategy) -> Vec<Person> {
    strategy.collect(people.to_vec(), &people_collector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::roster;
    use std::collections::HashSet;

    fn names(people: &[Person]) -> Vec<&str> {
        people.iter().map(Person::name).collect()
    }

    fn as_set(people: &[Person]) -> HashSet<Person> {
        people.iter().cloned().collect()
    }

    #[test]
    fn test_group_by_country() {
        let people = roster();
        let groups = group_by_country(&people);

        let keys: HashSet<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, HashSet::from(["US", "UK", "CN", "FR"]));
        assert_eq!(names(&groups["US"]), vec!["Alan", "Bruce"]);

        for (country, members) in &groups {
            assert!(members.iter().all(|p| p.country() == country));
        }

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, people.len());
        let union: HashSet<Person> = groups.values().flatten().cloned().collect();
        assert_eq!(union, as_set(&people));
    }

    #[test]
    fn test_partition_by_age() {
        let people = roster();
        let split = partition_by_age(&people);

        assert_eq!(names(split.get(true)), vec!["Alan", "Crane", "Ella"]);
        assert_eq!(names(split.get(false)), vec!["Bruce", "Dolly"]);

        let adults = as_set(&split.when_true);
        let minors = as_set(&split.when_false);
        assert!(adults.is_disjoint(&minors));
        assert_eq!(&adults | &minors, as_set(&people));
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&roster()), "Alan, Bruce, Crane, Dolly, Ella");
    }

    #[test]
    fn test_collect_people_under_every_strategy() {
        let people = roster();
        for strategy in [
            Strategy::Sequential,
            Strategy::Parallel,
            Strategy::Chunked(1),
            Strategy::Chunked(2),
            Strategy::Chunked(3),
            Strategy::Chunked(5),
            Strategy::Chunked(8),
        ] {
            let collected = collect_people(&people, strategy);
            assert_eq!(collected.len(), people.len(), "{strategy}");
            assert_eq!(as_set(&collected), as_set(&people), "{strategy}");
        }
    }

    #[test]
    fn test_runs_are_repeatable() {
        let people = roster();
        let first = run(&people, Strategy::Parallel);
        let second = run(&people, Strategy::Chunked(2));
        assert_eq!(first.by_country, second.by_country);
        assert_eq!(first.by_age, second.by_age);
        assert_eq!(first.joined_names, second.joined_names);
        assert_eq!(as_set(&first.collected), as_set(&second.collected));
    }
}
