use std::fmt;
use std::str::FromStr;

/// Trailing window of historical prices shown in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    FiveYears,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::OneMonth,
        Interval::ThreeMonths,
        Interval::SixMonths,
        Interval::OneYear,
        Interval::FiveYears,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Interval::OneMonth => "1M",
            Interval::ThreeMonths => "3M",
            Interval::SixMonths => "6M",
            Interval::OneYear => "1Y",
            Interval::FiveYears => "5Y",
        }
    }

    /// Button caption shown in the interval bar.
    pub fn label(self) -> &'static str {
        match self {
            Interval::OneMonth => "1 Month",
            Interval::ThreeMonths => "3 Months",
            Interval::SixMonths => "6 Months",
            Interval::OneYear => "1 Year",
            Interval::FiveYears => "5 Years",
        }
    }

    /// Length of the window in calendar months.
    pub fn months(self) -> u32 {
        match self {
            Interval::OneMonth => 1,
            Interval::ThreeMonths => 3,
            Interval::SixMonths => 6,
            Interval::OneYear => 12,
            Interval::FiveYears => 60,
        }
    }

    /// Parse an interval code, falling back to the one-year window for anything unknown.
    pub fn from_code_lenient(code: &str) -> Interval {
        code.parse().unwrap_or_default()
    }

    pub fn next(self) -> Interval {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Interval {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(3)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterval(pub String);

impl fmt::Display for UnknownInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interval `{}` (expected one of 1M, 3M, 6M, 1Y, 5Y)",
            self.0
        )
    }
}

impl std::error::Error for UnknownInterval {}

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|interval| interval.code() == normalized)
            .ok_or_else(|| UnknownInterval(s.to_string()))
    }
}
