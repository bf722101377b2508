use std::fmt::Display;

use itertools::Itertools;

use crate::demo::DemoReport;

/// One titled block of output lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
}

impl Section {
    pub fn header(&self) -> String {
        format!("-----{}:", self.title)
    }
}

/// `[a, b, c]`
pub fn render_sequence<T: Display>(items: &[T]) -> String {
    format!("[{}]", items.iter().join(", "))
}

/// `key -> [a, b, c]`
pub fn render_entry<K: Display, T: Display>(key: K, items: &[T]) -> String {
    format!("{} -> {}", key, render_sequence(items))
}

/// Render a report as Group, Partition, join and Collector sections.
///
/// Group lines follow the map's iteration order.
pub fn render(report: &DemoReport) -> Vec<Section> {
    vec![
        Section {
            title: "Group",
            lines: report
                .by_country
                .iter()
                .map(|(country, people)| render_entry(country, people))
                .collect(),
        },
        Section {
            title: "Partition",
            lines: report
                .by_age
                .iter()
                .map(|(adult, people)| render_entry(adult, people))
                .collect(),
        },
        Section {
            title: "join",
            lines: vec![report.joined_names.clone()],
        },
        Section {
            title: "Collector",
            lines: vec![render_sequence(&report.collected)],
        },
    ]
}
