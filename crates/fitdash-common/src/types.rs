use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar order starting Sunday. Every weekday-keyed aggregate and axis
/// follows this order regardless of which days appear first in the data.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English label used on axes and in tables.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// One tracker record for one user on one day.
///
/// Records are built once per data load by the parser and are never
/// mutated afterwards; every aggregate and chart is derived from a
/// borrowed slice of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Tracker user identifier
    pub id: u64,
    /// Calendar day the totals belong to
    pub date: NaiveDate,
    pub total_steps: u32,
    pub calories: f64,
    /// Distance in kilometres
    pub total_distance: f64,
    pub very_active_minutes: u32,
    pub fairly_active_minutes: u32,
    pub lightly_active_minutes: u32,
    pub sedentary_minutes: u32,
}

impl ActivityRecord {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Very + fairly + lightly active minutes.
    pub fn active_minutes(&self) -> u32 {
        self.very_active_minutes
            .saturating_add(self.fairly_active_minutes)
            .saturating_add(self.lightly_active_minutes)
    }
}

/// Fixed activity-intensity categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    VeryActive,
    FairlyActive,
    LightlyActive,
    Sedentary,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 4] = [
        ActivityCategory::VeryActive,
        ActivityCategory::FairlyActive,
        ActivityCategory::LightlyActive,
        ActivityCategory::Sedentary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::VeryActive => "Very Active",
            ActivityCategory::FairlyActive => "Fairly Active",
            ActivityCategory::LightlyActive => "Lightly Active",
            ActivityCategory::Sedentary => "Sedentary",
        }
    }

    /// Minutes this category contributes for a single record.
    pub fn minutes(&self, record: &ActivityRecord) -> u32 {
        match self {
            ActivityCategory::VeryActive => record.very_active_minutes,
            ActivityCategory::FairlyActive => record.fairly_active_minutes,
            ActivityCategory::LightlyActive => record.lightly_active_minutes,
            ActivityCategory::Sedentary => record.sedentary_minutes,
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A key from a fixed domain mapped to a derived value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBucket<K> {
    pub key: K,
    pub value: f64,
}

pub type WeekdayBucket = AggregatedBucket<Weekday>;

/// Summed minutes of one category and its share of the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: ActivityCategory,
    pub total_minutes: u64,
    /// Share in hundredths of a percent (10000 == 100.00%)
    pub percentage_hundredths: u32,
}

impl CategoryShare {
    pub fn percentage(&self) -> f64 {
        f64::from(self.percentage_hundredths) / 100.0
    }

    /// Two-decimal rendering used by pie labels and tables.
    pub fn percentage_label(&self) -> String {
        format!("{}.{:02}%", self.percentage_hundredths / 100, self.percentage_hundredths % 100)
    }
}

/// Whole-dataset figures shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Distinct user identifiers
    pub users: usize,
    /// Number of records (user-days)
    pub days: usize,
    pub avg_steps: f64,
    pub avg_distance: f64,
    pub avg_active_minutes: f64,
    pub avg_sedentary_minutes: f64,
    pub avg_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
}

impl SummaryStats {
    pub fn cards(&self) -> Vec<SummaryCard> {
        let card = |label: &str, value: String| SummaryCard { label: label.to_string(), value };
        vec![
            card("No. of Users", self.users.to_string()),
            card("Avg Steps", format!("{:.0}", self.avg_steps.round())),
            card("Avg Distance (km)", format!("{:.2}", self.avg_distance)),
            card("Avg Active Minutes", format!("{:.0}", self.avg_active_minutes.round())),
            card("Avg Sedentary Minutes", format!("{:.0}", self.avg_sedentary_minutes.round())),
            card("Avg Calories", format!("{:.0}", self.avg_calories.round())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> ActivityRecord {
        ActivityRecord {
            id: 1503960366,
            date: NaiveDate::parse_from_str(date, "%m/%d/%Y").unwrap(),
            total_steps: 13162,
            calories: 1985.0,
            total_distance: 8.5,
            very_active_minutes: 25,
            fairly_active_minutes: 13,
            lightly_active_minutes: 328,
            sedentary_minutes: 728,
        }
    }

    #[test]
    fn test_weekday_order_starts_sunday() {
        assert_eq!(WEEKDAYS.len(), 7);
        assert_eq!(WEEKDAYS[0], Weekday::Sun);
        assert_eq!(WEEKDAYS[6], Weekday::Sat);
        for (i, day) in WEEKDAYS.iter().enumerate() {
            assert_eq!(day.num_days_from_sunday() as usize, i);
        }
    }

    #[test]
    fn test_weekday_labels() {
        let labels: Vec<&str> = WEEKDAYS.iter().map(|d| weekday_label(*d)).collect();
        assert_eq!(
            labels,
            vec!["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
    }

    #[test]
    fn test_record_weekday_and_active_minutes() {
        // 4/12/2016 was a Tuesday
        let r = record("4/12/2016");
        assert_eq!(r.weekday(), Weekday::Tue);
        assert_eq!(r.active_minutes(), 25 + 13 + 328);
    }

    #[test]
    fn test_category_minutes_extractors() {
        let r = record("4/12/2016");
        assert_eq!(ActivityCategory::VeryActive.minutes(&r), 25);
        assert_eq!(ActivityCategory::FairlyActive.minutes(&r), 13);
        assert_eq!(ActivityCategory::LightlyActive.minutes(&r), 328);
        assert_eq!(ActivityCategory::Sedentary.minutes(&r), 728);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ActivityCategory::FairlyActive).unwrap();
        assert_eq!(json, r#""fairly_active""#);
        assert_eq!(ActivityCategory::LightlyActive.to_string(), "Lightly Active");
    }

    #[test]
    fn test_percentage_label_keeps_two_decimals() {
        let share = CategoryShare {
            category: ActivityCategory::Sedentary,
            total_minutes: 10,
            percentage_hundredths: 8105,
        };
        assert_eq!(share.percentage_label(), "81.05%");
        assert!((share.percentage() - 81.05).abs() < 1e-9);

        let zero = CategoryShare { percentage_hundredths: 0, ..share };
        assert_eq!(zero.percentage_label(), "0.00%");
    }

    #[test]
    fn test_summary_cards_formatting() {
        let stats = SummaryStats {
            users: 33,
            days: 940,
            avg_steps: 7637.51,
            avg_distance: 5.489702,
            avg_active_minutes: 227.5,
            avg_sedentary_minutes: 991.21,
            avg_calories: 2303.6,
        };

        let cards = stats.cards();
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].value, "33");
        assert_eq!(cards[1].value, "7638");
        assert_eq!(cards[2].value, "5.49");
        assert_eq!(cards[3].value, "228");
        assert_eq!(cards[4].value, "991");
        assert_eq!(cards[5].value, "2304");
    }

    #[test]
    fn test_empty_summary_cards_are_zero() {
        let cards = SummaryStats::default().cards();
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[1].value, "0");
        assert_eq!(cards[2].value, "0.00");
    }
}
