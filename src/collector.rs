//! The accumulate/merge protocol and the stock collectors built on it.
//!
//! A collector describes a reduction in four steps: `supply` an empty
//! container, `accumulate` elements into it, `combine` two partial
//! containers, and `finish` the last one into the output. Because
//! `combine` is available, the same collector runs sequentially or over
//! independently accumulated chunks (see [`crate::strategy`]).

use std::collections::HashMap;
use std::hash::Hash;

// =============================================================================
// Milestone 1: The Collector protocol
// =============================================================================

pub trait Collector<T> {
    /// Mutable result container built up during accumulation.
    type Container;
    /// Value handed back once accumulation and merging are done.
    type Output;

    fn supply(&self) -> Self::Container;

    fn accumulate(&self, container: &mut Self::Container, item: T);

    /// Merge two partial containers. Elements of `left` come first.
    fn combine(&self, left: Self::Container, right: Self::Container) -> Self::Container;

    fn finish(&self, container: Self::Container) -> Self::Output;

    /// Run the collector sequentially over `items`.
    fn collect<I>(&self, items: I) -> Self::Output
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut container = self.supply();
        for item in items {
            self.accumulate(&mut container, item);
        }
        self.finish(container)
    }
}

// =============================================================================
// Milestone 2: Closure-built collectors
// =============================================================================

/// Collector assembled from closures.
///
/// `FnCollector::of` takes a supplier, an accumulator and a combiner and
/// finishes with the identity; `with_finisher` swaps in a final step.
pub struct FnCollector<S, A, C, F> {
    supplier: S,
    accumulator: A,
    combiner: C,
    finisher: F,
}

impl<R, S, A, C> FnCollector<S, A, C, fn(R) -> R>
where
    S: Fn() -> R,
{
    pub fn of(supplier: S, accumulator: A, combiner: C) -> Self {
        FnCollector {
            supplier,
            accumulator,
            combiner,
            finisher: std::convert::identity,
        }
    }
}

impl<S, A, C, F> FnCollector<S, A, C, F> {
    pub fn with_finisher<G>(self, finisher: G) -> FnCollector<S, A, C, G> {
        FnCollector {
            supplier: self.supplier,
            accumulator: self.accumulator,
            combiner: self.combiner,
            finisher,
        }
    }
}

impl<T, R, O, S, A, C, F> Collector<T> for FnCollector<S, A, C, F>
where
    S: Fn() -> R,
    A: Fn(&mut R, T),
    C: Fn(R, R) -> R,
    F: Fn(R) -> O,
{
    type Container = R;
    type Output = O;

    fn supply(&self) -> R {
        (self.supplier)()
    }

    fn accumulate(&self, container: &mut R, item: T) {
        (self.accumulator)(container, item)
    }

    fn combine(&self, left: R, right: R) -> R {
        (self.combiner)(left, right)
    }

    fn finish(&self, container: R) -> O {
        (self.finisher)(container)
    }
}

// =============================================================================
// Milestone 3: Stock collectors
// =============================================================================

/// Collects elements into a `Vec` in encounter order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToVec;

impl<T> Collector<T> for ToVec {
    type Container = Vec<T>;
    type Output = Vec<T>;

    fn supply(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&self, container: &mut Vec<T>, item: T) {
        container.push(item);
    }

    fn combine(&self, mut left: Vec<T>, mut right: Vec<T>) -> Vec<T> {
        left.append(&mut right);
        left
    }

    fn finish(&self, container: Vec<T>) -> Vec<T> {
        container
    }
}

/// Groups elements by a classifier key, reducing each group with a
/// downstream collector.
#[derive(Debug, Clone)]
pub struct GroupingBy<F, D = ToVec> {
    classifier: F,
    downstream: D,
}

impl<F> GroupingBy<F> {
    pub fn new(classifier: F) -> Self {
        GroupingBy {
            classifier,
            downstream: ToVec,
        }
    }
}

impl<F, D> GroupingBy<F, D> {
    pub fn with_downstream<E>(self, downstream: E) -> GroupingBy<F, E> {
        GroupingBy {
            classifier: self.classifier,
            downstream,
        }
    }
}

impl<T, K, F, D> Collector<T> for GroupingBy<F, D>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
    D: Collector<T>,
{
    type Container = HashMap<K, D::Container>;
    type Output = HashMap<K, D::Output>;

    fn supply(&self) -> Self::Container {
        HashMap::new()
    }

    fn accumulate(&self, container: &mut Self::Container, item: T) {
        let group = container
            .entry((self.classifier)(&item))
            .or_insert_with(|| self.downstream.supply());
        self.downstream.accumulate(group, item);
    }

    fn combine(&self, mut left: Self::Container, right: Self::Container) -> Self::Container {
        for (key, right_group) in right {
            let merged = match left.remove(&key) {
                Some(left_group) => self.downstream.combine(left_group, right_group),
                None => right_group,
            };
            left.insert(key, merged);
        }
        left
    }

    fn finish(&self, container: Self::Container) -> Self::Output {
        container
            .into_iter()
            .map(|(key, group)| (key, self.downstream.finish(group)))
            .collect()
    }
}

/// Result of a partition: always exactly two groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition<V> {
    pub when_true: V,
    pub when_false: V,
}

impl<V> Partition<V> {
    pub fn get(&self, key: bool) -> &V {
        if key {
            &self.when_true
        } else {
            &self.when_false
        }
    }

    pub fn get_mut(&mut self, key: bool) -> &mut V {
        if key {
            &mut self.when_true
        } else {
            &mut self.when_false
        }
    }

    /// Both groups, `false` first.
    pub fn iter(&self) -> impl Iterator<Item = (bool, &V)> {
        [(false, &self.when_false), (true, &self.when_true)].into_iter()
    }

    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> Partition<U> {
        let when_false = f(self.when_false);
        let when_true = f(self.when_true);
        Partition {
            when_true,
            when_false,
        }
    }
}

/// Splits elements on a predicate, reducing each side with a downstream
/// collector.
#[derive(Debug, Clone)]
pub struct PartitioningBy<P, D = ToVec> {
    predicate: P,
    downstream: D,
}

impl<P> PartitioningBy<P> {
    pub fn new(predicate: P) -> Self {
        PartitioningBy {
            predicate,
            downstream: ToVec,
        }
    }
}

impl<P, D> PartitioningBy<P, D> {
    pub fn with_downstream<E>(self, downstream: E) -> PartitioningBy<P, E> {
        PartitioningBy {
            predicate: self.predicate,
            downstream,
        }
    }
}

impl<T, P, D> Collector<T> for PartitioningBy<P, D>
where
    P: Fn(&T) -> bool,
    D: Collector<T>,
{
    type Container = Partition<D::Container>;
    type Output = Partition<D::Output>;

    fn supply(&self) -> Self::Container {
        Partition {
            when_true: self.downstream.supply(),
            when_false: self.downstream.supply(),
        }
    }

    fn accumulate(&self, container: &mut Self::Container, item: T) {
        let side = container.get_mut((self.predicate)(&item));
        self.downstream.accumulate(side, item);
    }

    fn combine(&self, left: Self::Container, right: Self::Container) -> Self::Container {
        Partition {
            when_true: self.downstream.combine(left.when_true, right.when_true),
            when_false: self.downstream.combine(left.when_false, right.when_false),
        }
    }

    fn finish(&self, container: Self::Container) -> Self::Output {
        container.map(|side| self.downstream.finish(side))
    }
}

/// Concatenates string-like elements with a separator, wrapped in an
/// optional prefix and suffix.
#[derive(Debug, Clone, Default)]
pub struct Joining {
    separator: String,
    prefix: String,
    suffix: String,
}

impl Joining {
    pub fn new(separator: impl Into<String>) -> Self {
        Joining {
            separator: separator.into(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }
}

impl<S: AsRef<str>> Collector<S> for Joining {
    // `None` until the first element arrives, so empty strings still count.
    type Container = Option<String>;
    type Output = String;

    fn supply(&self) -> Option<String> {
        None
    }

    fn accumulate(&self, container: &mut Option<String>, item: S) {
        match container {
            Some(buf) => {
                buf.push_str(&self.separator);
                buf.push_str(item.as_ref());
            }
            None => *container = Some(item.as_ref().to_owned()),
        }
    }

    fn combine(&self, left: Option<String>, right: Option<String>) -> Option<String> {
        match (left, right) {
            (Some(mut left), Some(right)) => {
                left.push_str(&self.separator);
                left.push_str(&right);
                Some(left)
            }
            (left, None) => left,
            (None, right) => right,
        }
    }

    fn finish(&self, container: Option<String>) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            container.as_deref().unwrap_or_default(),
            self.suffix
        )
    }
}

/// Transforms each element before handing it to a downstream collector.
#[derive(Debug, Clone)]
pub struct Mapping<F, D> {
    mapper: F,
    downstream: D,
}

impl<T, U, F, D> Collector<T> for Mapping<F, D>
where
    F: Fn(T) -> U,
    D: Collector<U>,
{
    type Container = D::Container;
    type Output = D::Output;

    fn supply(&self) -> D::Container {
        self.downstream.supply()
    }

    fn accumulate(&self, container: &mut D::Container, item: T) {
        self.downstream.accumulate(container, (self.mapper)(item));
    }

    fn combine(&self, left: D::Container, right: D::Container) -> D::Container {
        self.downstream.combine(left, right)
    }

    fn finish(&self, container: D::Container) -> D::Output {
        self.downstream.finish(container)
    }
}

// =============================================================================
// Milestone 4: Constructors
// =============================================================================

pub fn to_vec() -> ToVec {
    ToVec
}

pub fn grouping_by<F>(classifier: F) -> GroupingBy<F> {
    GroupingBy::new(classifier)
}

pub fn partitioning_by<P>(predicate: P) -> PartitioningBy<P> {
    PartitioningBy::new(predicate)
}

pub fn joining(separator: impl Into<String>) -> Joining {
    Joining::new(separator)
}

pub fn mapping<F, D>(mapper: F, downstream: D) -> Mapping<F, D> {
    Mapping { mapper, downstream }
}
