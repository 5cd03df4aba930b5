//! Scenario file parsing and runtime settings.
//!
//! A scenario file has three sections:
//!
//! ```text
//! NC=2 NW=3 NT=5
//! Burger=00:15 Pizza=00:20 Salad=00:05
//! CustomerID=1 ArrivalTime=18:00 Order=Burger
//! CustomerID=2 ArrivalTime=18:05 Order=Salad
//! ```
//!
//! Line one is the staffing (chefs, waiters, tables), line two the menu with
//! preparation times as `HH:MM`, and every further non-empty line one roster
//! entry. Roster items are validated against the menu here, so a meal can
//! never reference an unknown dish at delivery time.

use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{time_to_minutes, Tick, TimeParseError};
use crate::domain::CustomerId;

/// One roster line: who arrives when, wanting what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSpec {
    pub id: CustomerId,
    pub arrival: Tick,
    pub item: String,
}

/// A fully parsed scenario file.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub chefs: u32,
    pub waiters: u32,
    pub tables: u32,
    /// Menu item name → preparation time in ticks.
    pub menu: HashMap<String, Tick>,
    pub roster: Vec<CustomerSpec>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected}=<value>, got {got:?}")]
    MalformedPair { line: usize, expected: &'static str, got: String },
    #[error("line {line}: {got:?} is not a number")]
    BadNumber { line: usize, got: String },
    #[error("line {line}: {source}")]
    BadTime {
        line: usize,
        #[source]
        source: TimeParseError,
    },
    #[error("line {line}: missing {key}")]
    MissingKey { line: usize, key: &'static str },
    #[error("scenario file ends before the {0} line")]
    MissingSection(&'static str),
    #[error("line {line}: customer {customer} orders {item:?}, which is not on the menu")]
    UnknownMenuItem { line: usize, customer: CustomerId, item: String },
}

/// Takes the value half of a `key=value` token.
fn field<'a>(
    token: Option<&'a str>,
    line: usize,
    expected: &'static str,
) -> Result<&'a str, ConfigError> {
    token
        .and_then(|t| t.split_once('='))
        .map(|(_, value)| value)
        .ok_or_else(|| ConfigError::MalformedPair {
            line,
            expected,
            got: token.unwrap_or_default().to_string(),
        })
}

impl Scenario {
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (line, staffing) = lines.next().ok_or(ConfigError::MissingSection("staffing"))?;
        let mut counts = HashMap::new();
        for token in staffing.split_whitespace() {
            let value = field(Some(token), line, "NC|NW|NT")?;
            let key = token.split_once('=').map(|(key, _)| key).unwrap_or_default();
            let value: u32 = value
                .parse()
                .map_err(|_| ConfigError::BadNumber { line, got: value.to_string() })?;
            counts.insert(key.to_string(), value);
        }
        let need = |key: &'static str| {
            counts.get(key).copied().ok_or(ConfigError::MissingKey { line, key })
        };
        let chefs = need("NC")?;
        let waiters = need("NW")?;
        let tables = need("NT")?;

        let (line, menu_line) = lines.next().ok_or(ConfigError::MissingSection("menu"))?;
        let mut menu = HashMap::new();
        for token in menu_line.split_whitespace() {
            let (item, time) = token.split_once('=').ok_or_else(|| ConfigError::MalformedPair {
                line,
                expected: "item",
                got: token.to_string(),
            })?;
            let ticks = time_to_minutes(time)
                .map_err(|source| ConfigError::BadTime { line, source })?;
            menu.insert(item.to_string(), ticks);
        }

        let mut roster = Vec::new();
        for (line, entry) in lines {
            let mut tokens = entry.split_whitespace();
            let raw_id = field(tokens.next(), line, "CustomerID")?;
            let id: CustomerId = raw_id
                .parse()
                .map_err(|_| ConfigError::BadNumber { line, got: raw_id.to_string() })?;
            let arrival = time_to_minutes(field(tokens.next(), line, "ArrivalTime")?)
                .map_err(|source| ConfigError::BadTime { line, source })?;
            let item = field(tokens.next(), line, "Order")?.to_string();
            if !menu.contains_key(&item) {
                return Err(ConfigError::UnknownMenuItem { line, customer: id, item });
            }
            roster.push(CustomerSpec { id, arrival, item });
        }

        Ok(Self { chefs, waiters, tables, menu, roster })
    }

    /// The tick the clock starts from: the earliest arrival on the roster.
    pub fn earliest_arrival(&self) -> Tick {
        self.roster.iter().map(|spec| spec.arrival).min().unwrap_or(0)
    }
}

/// Runtime knobs that are not part of the scenario file.
#[derive(Debug, Clone)]
pub struct SimSettings {
    /// Wall-clock length of one simulated minute.
    pub tick_period: Duration,
    /// How long a customer lingers over the meal, in ticks; the actual
    /// duration is drawn uniformly from this range.
    pub eating_ticks: RangeInclusive<Tick>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self { tick_period: Duration::from_secs(1), eating_ticks: 10..=20 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NC=2 NW=2 NT=3
Burger=00:15 Pizza=00:20 Salad=00:05
CustomerID=1 ArrivalTime=18:00 Order=Pizza

CustomerID=2 ArrivalTime=18:05 Order=Salad
";

    #[test]
    fn parses_a_complete_scenario() {
        let scenario = Scenario::parse(SAMPLE).expect("sample parses");
        assert_eq!(scenario.chefs, 2);
        assert_eq!(scenario.waiters, 2);
        assert_eq!(scenario.tables, 3);
        assert_eq!(scenario.menu["Pizza"], 20);
        assert_eq!(scenario.menu["Salad"], 5);
        assert_eq!(
            scenario.roster,
            vec![
                CustomerSpec { id: 1, arrival: 18 * 60, item: "Pizza".into() },
                CustomerSpec { id: 2, arrival: 18 * 60 + 5, item: "Salad".into() },
            ]
        );
        assert_eq!(scenario.earliest_arrival(), 18 * 60);
    }

    #[test]
    fn rejects_an_order_that_is_not_on_the_menu() {
        let text = "\
NC=1 NW=1 NT=1
Soup=00:08
CustomerID=1 ArrivalTime=09:00 Order=Sushi
";
        match Scenario::parse(text) {
            Err(ConfigError::UnknownMenuItem { line, customer, item }) => {
                assert_eq!(line, 3);
                assert_eq!(customer, 1);
                assert_eq!(item, "Sushi");
            }
            other => panic!("expected UnknownMenuItem, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_times_and_malformed_pairs() {
        let bad_time = "\
NC=1 NW=1 NT=1
Soup=8 minutes
";
        assert!(matches!(
            Scenario::parse(bad_time),
            Err(ConfigError::BadTime { line: 2, .. })
        ));

        let malformed = "NC=1 NW1 NT=1\nSoup=00:08\n";
        assert!(matches!(
            Scenario::parse(malformed),
            Err(ConfigError::MalformedPair { line: 1, .. })
        ));

        assert!(matches!(
            Scenario::parse("NC=1 NW=1\nSoup=00:08\n"),
            Err(ConfigError::MissingKey { key: "NT", .. })
        ));

        assert!(matches!(
            Scenario::parse(""),
            Err(ConfigError::MissingSection("staffing"))
        ));
    }

    #[test]
    fn empty_roster_is_allowed() {
        let scenario = Scenario::parse("NC=1 NW=1 NT=1\nSoup=00:08\n").expect("parses");
        assert!(scenario.roster.is_empty());
        assert_eq!(scenario.earliest_arrival(), 0);
    }
}
