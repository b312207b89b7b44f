//! Canonical bundle files

use crate::ConfigPath;

/// Canonical path of the bundle manifest.
pub const MANIFEST_PATH: &str = "meta/bundle.toml";

/// The built-in set of files making up an Android bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleFile {
    Config,
    Manifest,
    IntervalProcessor,
    AliasMapping,
    DurationRules,
    DayReport,
    MonthReport,
    PeriodReport,
    WeekReport,
    YearReport,
}

impl BundleFile {
    /// Every bundle file, in commit order.
    pub const ALL: [BundleFile; 10] = [
        Self::Config,
        Self::Manifest,
        Self::IntervalProcessor,
        Self::AliasMapping,
        Self::DurationRules,
        Self::DayReport,
        Self::MonthReport,
        Self::PeriodReport,
        Self::WeekReport,
        Self::YearReport,
    ];

    /// Get the canonical relative path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config.toml",
            Self::Manifest => MANIFEST_PATH,
            Self::IntervalProcessor => "converter/interval_processor_config.toml",
            Self::AliasMapping => "converter/alias_mapping.toml",
            Self::DurationRules => "converter/duration_rules.toml",
            Self::DayReport => "reports/markdown/day.toml",
            Self::MonthReport => "reports/markdown/month.toml",
            Self::PeriodReport => "reports/markdown/period.toml",
            Self::WeekReport => "reports/markdown/week.toml",
            Self::YearReport => "reports/markdown/year.toml",
        }
    }

    pub fn config_path(&self) -> ConfigPath {
        ConfigPath::from_canonical(self.as_str())
    }
}

impl AsRef<str> for BundleFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for BundleFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
