//! Threshold rules for current conditions.
//!
//! The table is evaluated top to bottom and the FIRST matching rule wins:
//! - temperature > 32                      → extreme heat (high)
//! - temperature > 28 and humidity < 30    → dry and hot air (medium)
//! - weather code >= 95                    → thunderstorm (high)
//! - weather code >= 61                    → steady rain (medium)
//! - temperature < 18                      → low temperature (medium)
//! - otherwise                             → stable weather (low)
//!
//! Weather codes follow the WMO interpretation table (61+ rain, 95+ thunderstorm).

use crate::payload::Severity;

/// Inputs a rule may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub weather_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insight {
    pub message: &'static str,
    pub severity: Severity,
}

struct Rule {
    name: &'static str,
    when: fn(&Reading) -> bool,
    then: Insight,
}

const RULES: &[Rule] = &[
    Rule {
        name: "extreme_heat",
        when: |r: &Reading| r.temperature > 32.0,
        then: Insight {
            message: "extreme heat warning",
            severity: Severity::High,
        },
    },
    Rule {
        name: "dry_heat",
        when: |r: &Reading| r.temperature > 28.0 && r.humidity < 30.0,
        then: Insight {
            message: "dry and hot air",
            severity: Severity::Medium,
        },
    },
    Rule {
        name: "thunderstorm",
        when: |r: &Reading| r.weather_code >= 95,
        then: Insight {
            message: "thunderstorm detected",
            severity: Severity::High,
        },
    },
    Rule {
        name: "rain",
        when: |r: &Reading| r.weather_code >= 61,
        then: Insight {
            message: "steady rain",
            severity: Severity::Medium,
        },
    },
    Rule {
        name: "cold",
        when: |r: &Reading| r.temperature < 18.0,
        then: Insight {
            message: "low temperature",
            severity: Severity::Medium,
        },
    },
];

pub const STABLE: Insight = Insight {
    message: "stable weather",
    severity: Severity::Low,
};

/// First matching rule, or [`STABLE`].
pub fn classify(reading: &Reading) -> Insight {
    for rule in RULES {
        if (rule.when)(reading) {
            tracing::debug!(rule = rule.name, ?reading, "insight rule matched");
            return rule.then;
        }
    }
    STABLE
}
