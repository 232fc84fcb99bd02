use crate::composition::{self, Composition};
use indexmap::IndexMap;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

// Applied to the base score when sizes match and either count matches too
pub const BONUS_MULTIPLIER: f64 = 1.5;
// Even destinations value driver vowels at this rate
pub const EVEN_VOWEL_WEIGHT: f64 = 1.5;

/// Destinations are split by the parity of their size. Each group carries its
/// own base score rule for drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Even,
    Odd,
}

impl Group {
    pub fn of(composition: &Composition) -> Group {
        if composition.is_even() {
            Group::Even
        } else {
            Group::Odd
        }
    }

    pub fn base_score(&self, driver: &Composition) -> f64 {
        match self {
            Group::Even => driver.vowels as f64 * EVEN_VOWEL_WEIGHT,
            Group::Odd => driver.consonants as f64,
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Group::Even => write!(f, "even"),
            Group::Odd => write!(f, "odd"),
        }
    }
}

/// Score of a single destination/driver pair under the given group's base rule.
pub fn score(destination: &Composition, driver: &Composition, group: Group) -> f64 {
    let base = group.base_score(driver);
    if has_bonus(destination, driver) {
        base * BONUS_MULTIPLIER
    } else {
        base
    }
}

fn has_bonus(destination: &Composition, driver: &Composition) -> bool {
    destination.size == driver.size
        && (destination.vowels == driver.vowels || destination.consonants == driver.consonants)
}

/// Drivers still available for assignment, in pool order.
///
/// Keyed by the driver string. A repeated driver string keeps the position of
/// its first occurrence and is only assignable once. This follows ordered-map
/// `insert` semantics on purpose rather than moving the repeat to the end.
#[derive(Debug, Default)]
pub struct DriverPool {
    drivers: IndexMap<String, Composition>,
    collapsed: usize,
}

impl DriverPool {
    pub fn new<S: AsRef<str>>(drivers: &[S]) -> DriverPool {
        let mut pool = DriverPool::default();
        for driver in drivers {
            let composition = composition::analyze(driver.as_ref());
            if pool.drivers.insert(composition.value.clone(), composition).is_some() {
                pool.collapsed += 1;
            }
        }
        if pool.collapsed > 0 {
            warn!("{} duplicate driver(s) collapsed into a single pool entry", pool.collapsed);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Number of input drivers dropped because their string was already pooled
    pub fn collapsed(&self) -> usize {
        self.collapsed
    }

    // Highest scoring driver for the destination. Only a strictly better score
    // replaces the current best, so ties go to the earliest driver in the pool.
    fn best_for(&self, destination: &Composition, group: Group) -> Option<(usize, f64)> {
        let mut max_score = f64::NEG_INFINITY;
        let mut selected = None;
        for (index, driver) in self.drivers.values().enumerate() {
            let pair_score = score(destination, driver, group);
            if pair_score > max_score {
                max_score = pair_score;
                selected = Some(index);
            }
        }
        selected.map(|index| (index, max_score))
    }

    fn take(&mut self, index: usize) -> Option<Composition> {
        self.drivers.shift_remove_index(index).map(|(_, driver)| driver)
    }

    fn into_remaining(self) -> Vec<Composition> {
        self.drivers.into_values().collect()
    }
}

#[derive(Debug, Default)]
pub struct DestinationGroups {
    pub even: Vec<Composition>,
    pub odd: Vec<Composition>,
}

impl DestinationGroups {
    pub fn new<S: AsRef<str>>(destinations: &[S]) -> DestinationGroups {
        let mut groups = DestinationGroups::default();
        for destination in destinations {
            let composition = composition::analyze(destination.as_ref());
            match Group::of(&composition) {
                Group::Even => groups.even.push(composition),
                Group::Odd => groups.odd.push(composition),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.even.len() + self.odd.len()
    }

    /// Even group first, then odd, each in input order
    pub fn iter(&self) -> impl Iterator<Item = (Group, &Composition)> {
        self.even
            .iter()
            .map(|destination| (Group::Even, destination))
            .chain(self.odd.iter().map(|destination| (Group::Odd, destination)))
    }
}

/// Total score and the driver -> destination mapping, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentResult {
    #[serde(rename = "suitableScore")]
    pub suitable_score: f64,
    pub mapping: IndexMap<String, String>,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PlacementStat {
    Bonus,    // Driver assigned with the same-size bonus
    Base,     // Driver assigned at base score
    NoDriver, // Pool was empty
}

impl PlacementStat {
    pub fn to_str(&self) -> &str {
        match self {
            PlacementStat::Bonus => "Bonus",
            PlacementStat::Base => "Base",
            PlacementStat::NoDriver => "No driver",
        }
    }
}

impl Display for PlacementStat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// How one destination was resolved
#[derive(Debug, Clone)]
pub struct Placement {
    pub destination: Composition,
    pub group: Group,
    pub driver: Option<Composition>,
    pub score: f64,
    pub stat: PlacementStat,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AssignmentStatistics {
    pub placement_types: FxHashMap<PlacementStat, usize>,
    pub number_of_destinations: usize,
    pub even_destinations: usize,
    pub odd_destinations: usize,
    pub number_of_drivers: usize,
    pub pooled_drivers: usize,
    pub collapsed_drivers: usize,
    pub unused_drivers: usize,
}

impl AssignmentStatistics {
    pub fn update(&mut self, stat: PlacementStat) {
        *self.placement_types.entry(stat).or_insert(0) += 1;
    }

    pub fn placement_stat(&self, stat: PlacementStat) -> usize {
        *self.placement_types.get(&stat).unwrap_or(&0)
    }

    pub fn assigned(&self) -> usize {
        self.placement_stat(PlacementStat::Bonus) + self.placement_stat(PlacementStat::Base)
    }

    pub fn placement_stat_percent(&self, stat: PlacementStat) -> f64 {
        if self.number_of_destinations == 0 {
            return 0.0;
        }
        (self.placement_stat(stat) as f64 / self.number_of_destinations as f64) * 100.0
    }
}

/// Full outcome of a run: the result record plus the per-destination trail
/// used for reporting.
#[derive(Debug)]
pub struct Assignment {
    pub result: AssignmentResult,
    pub placements: Vec<Placement>,
    pub unused_drivers: Vec<Composition>,
    pub statistics: AssignmentStatistics,
}

#[allow(dead_code)]
pub fn execute<D: AsRef<str>, R: AsRef<str>>(destinations: &[D], drivers: &[R]) -> AssignmentResult {
    assign(destinations, drivers).result
}

pub fn assign<D: AsRef<str>, R: AsRef<str>>(destinations: &[D], drivers: &[R]) -> Assignment {
    let mut pool = DriverPool::new(drivers);
    let groups = DestinationGroups::new(destinations);
    let mut statistics = AssignmentStatistics {
        number_of_destinations: groups.len(),
        even_destinations: groups.even.len(),
        odd_destinations: groups.odd.len(),
        number_of_drivers: drivers.len(),
        pooled_drivers: pool.len(),
        collapsed_drivers: pool.collapsed(),
        ..Default::default()
    };
    info!(
        "Assigning {} destinations ({} even, {} odd) from a pool of {} drivers",
        statistics.number_of_destinations, statistics.even_destinations, statistics.odd_destinations, statistics.pooled_drivers
    );

    let mut result = AssignmentResult::default();
    let mut placements = Vec::with_capacity(groups.len());
    for (group, destination) in groups.iter() {
        let placement = place(&mut pool, destination, group);
        if let Some(driver) = &placement.driver {
            result.mapping.insert(driver.value.clone(), destination.value.clone());
        }
        result.suitable_score += placement.score;
        statistics.update(placement.stat);
        debug!(
            "{} destination {:?} => {:?} ({})",
            group,
            destination.value,
            placement.driver.as_ref().map(|driver| driver.value.as_str()),
            placement.score
        );
        placements.push(placement);
    }

    let unused_drivers = pool.into_remaining();
    statistics.unused_drivers = unused_drivers.len();
    info!(
        "Assigned {} of {} destinations, suitable score {}",
        statistics.assigned(),
        statistics.number_of_destinations,
        result.suitable_score
    );
    Assignment {
        result,
        placements,
        unused_drivers,
        statistics,
    }
}

fn place(pool: &mut DriverPool, destination: &Composition, group: Group) -> Placement {
    let mut placement = Placement {
        destination: destination.clone(),
        group,
        driver: None,
        score: 0.0,
        stat: PlacementStat::NoDriver,
    };
    if pool.is_empty() {
        return placement;
    }
    if let Some((index, score)) = pool.best_for(destination, group) {
        if let Some(driver) = pool.take(index) {
            placement.stat = if has_bonus(destination, &driver) {
                PlacementStat::Bonus
            } else {
                PlacementStat::Base
            };
            placement.score = score;
            placement.driver = Some(driver);
        }
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rustc_hash::FxHashSet;

    fn mapping(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(driver, destination)| (driver.to_string(), destination.to_string())).collect()
    }

    #[test]
    fn even_destination_with_bonus() {
        let result = execute(&["ab"], &["ba"]);
        assert_eq!(result.suitable_score, 2.25);
        assert_eq!(result.mapping, mapping(&[("ba", "ab")]));
    }

    #[test]
    fn odd_destination_without_bonus() {
        let result = execute(&["abc"], &["xyz"]);
        assert_eq!(result.suitable_score, 3.0);
        assert_eq!(result.mapping, mapping(&[("xyz", "abc")]));
    }

    #[test]
    fn even_group_resolved_before_odd_group() {
        let result = execute(&["abc", "ab"], &["xyz", "ba"]);
        assert_eq!(result.suitable_score, 5.25);
        assert_eq!(result.mapping.get("ba").map(String::as_str), Some("ab"));
        assert_eq!(result.mapping.get("xyz").map(String::as_str), Some("abc"));
        // Even assignment is recorded first
        assert_eq!(result.mapping.keys().next().map(String::as_str), Some("ba"));

        let swapped = execute(&["ab", "abc"], &["ba", "xyz"]);
        assert_eq!(swapped, result);
    }

    #[test]
    fn no_drivers_scores_zero() {
        let drivers: Vec<String> = vec![];
        let result = execute(&["ab", "abc", "hello world"], &drivers);
        assert_eq!(result.suitable_score, 0.0);
        assert!(result.mapping.is_empty());
    }

    #[test]
    fn no_destinations_scores_zero() {
        let destinations: Vec<String> = vec![];
        let assignment = assign(&destinations, &["ab", "cd"]);
        assert_eq!(assignment.result.suitable_score, 0.0);
        assert!(assignment.result.mapping.is_empty());
        assert_eq!(assignment.unused_drivers.len(), 2);
    }

    #[test]
    fn even_group_claims_drivers_first() {
        // "abc" would score 3 against "xyz", but "ab" takes it first for 0
        let assignment = assign(&["abc", "ab"], &["xyz"]);
        assert_eq!(assignment.result.suitable_score, 0.0);
        assert_eq!(assignment.result.mapping, mapping(&[("xyz", "ab")]));
        let odd = &assignment.placements[1];
        assert_eq!(odd.group, Group::Odd);
        assert!(odd.driver.is_none());
        assert_eq!(odd.stat, PlacementStat::NoDriver);
    }

    #[test]
    fn ties_go_to_first_driver_in_pool() {
        // Both drivers have two vowels and no consonant in common with "zz"
        let result = execute(&["zz"], &["ea", "io"]);
        assert_eq!(result.suitable_score, 3.0);
        assert_eq!(result.mapping, mapping(&[("ea", "zz")]));

        let result = execute(&["zz"], &["io", "ea"]);
        assert_eq!(result.mapping, mapping(&[("io", "zz")]));
    }

    #[test]
    fn duplicate_drivers_are_assignable_once() {
        let assignment = assign(&["zz", "qq"], &["io", "ea", "io"]);
        assert_eq!(assignment.statistics.collapsed_drivers, 1);
        assert_eq!(assignment.statistics.pooled_drivers, 2);
        // "io" keeps its first position and wins the tie
        assert_eq!(assignment.result.mapping, mapping(&[("io", "zz"), ("ea", "qq")]));
        assert!(assignment.unused_drivers.is_empty());
    }

    #[test]
    fn size_mismatch_never_gets_bonus() {
        let destination = composition::analyze("abcd");
        let driver = composition::analyze("ab");
        assert_eq!(score(&destination, &driver, Group::Even), 1.5);
        assert_eq!(score(&destination, &driver, Group::Odd), 1.0);
    }

    #[test]
    fn shared_count_on_same_size_gets_bonus() {
        // size 4, two vowels, two consonants
        let destination = composition::analyze("bcae");
        // vowels match
        assert_eq!(score(&destination, &composition::analyze("ae1z"), Group::Even), 4.5);
        // consonants match
        assert_eq!(score(&destination, &composition::analyze("xy12"), Group::Odd), 3.0);
        // neither matches
        assert_eq!(score(&destination, &composition::analyze("bcdf"), Group::Odd), 4.0);
    }

    #[test]
    fn picks_highest_score_over_pool_order() {
        let result = execute(&["abcde"], &["b", "bcdfg", "bc"]);
        assert_eq!(result.mapping, mapping(&[("bcdfg", "abcde")]));
        assert_eq!(result.suitable_score, 5.0);
    }

    #[test]
    fn emoji_destination_is_even() {
        let assignment = assign(&["😀"], &["ab"]);
        let placement = &assignment.placements[0];
        assert_eq!(placement.group, Group::Even);
        assert_eq!(placement.score, 1.5);
        assert_eq!(assignment.result.mapping, mapping(&[("ab", "😀")]));
    }

    #[test]
    fn partition_is_by_size_parity() {
        let groups = DestinationGroups::new(&["a", "ab", "abc", "", "a b"]);
        let even: Vec<&str> = groups.even.iter().map(|c| c.value.as_str()).collect();
        let odd: Vec<&str> = groups.odd.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(even, vec!["ab", ""]);
        assert_eq!(odd, vec!["a", "abc", "a b"]);
    }

    #[test]
    fn statistics_count_placements() {
        let assignment = assign(&["ab", "abc", "zzzz"], &["ba", "xyz"]);
        let statistics = &assignment.statistics;
        assert_eq!(statistics.number_of_destinations, 3);
        assert_eq!(statistics.even_destinations, 2);
        assert_eq!(statistics.odd_destinations, 1);
        assert_eq!(statistics.assigned(), 2);
        assert_eq!(statistics.placement_stat(PlacementStat::NoDriver), 1);
        assert_eq!(statistics.unused_drivers, 0);
    }

    #[test]
    fn serializes_like_the_result_record() {
        let result = execute(&["ab"], &["ba"]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"suitableScore":2.25,"mapping":{"ba":"ab"}}"#);
    }

    #[test]
    fn mapping_is_exclusive_for_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet: Vec<char> = "abcdeiouxyz -".chars().collect();
        let random_word = |rng: &mut StdRng| -> String {
            let len = rng.random_range(0..6);
            (0..len).map(|_| alphabet[rng.random_range(0..alphabet.len())]).collect()
        };
        for _ in 0..200 {
            let destinations: Vec<String> = (0..rng.random_range(0..8)).map(|_| random_word(&mut rng)).collect();
            let drivers: Vec<String> = (0..rng.random_range(0..8)).map(|_| random_word(&mut rng)).collect();
            let assignment = assign(&destinations, &drivers);
            let result = &assignment.result;

            let distinct: FxHashSet<&String> = drivers.iter().collect();
            assert!(result.mapping.len() <= distinct.len().min(destinations.len()));
            for (driver, destination) in &result.mapping {
                assert!(distinct.contains(driver));
                assert!(destinations.contains(destination));
            }
            let total: f64 = assignment.placements.iter().map(|placement| placement.score).sum();
            assert_eq!(total, result.suitable_score);
            assert_eq!(assignment.placements.len(), destinations.len());
            assert_eq!(result.mapping.len() + assignment.unused_drivers.len(), distinct.len());
        }
    }
}
