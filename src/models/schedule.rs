use serde::{Serialize, Serializer};

/// Recurrence rule of a habit, as stored in `habits.schedule_days`
/// (a JSON array of weekday indices, Monday = 0 … Sunday = 6).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScheduleDays {
    /// NULL or empty list.
    #[default]
    EveryDay,
    Days(Vec<u8>),
    /// Stored text that is not a JSON array of weekday indices.
    /// Kept verbatim so a later edit can overwrite it; evaluated as every day.
    Malformed(String),
}

impl ScheduleDays {
    /// Parse the stored column value. Never fails.
    pub fn from_db(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return ScheduleDays::EveryDay;
        };

        match serde_json::from_str::<Vec<i64>>(raw) {
            Ok(days) if days.is_empty() => ScheduleDays::EveryDay,
            Ok(days) if days.iter().all(|d| (0..=6).contains(d)) => {
                let mut days: Vec<u8> = days.into_iter().map(|d| d as u8).collect();
                days.sort_unstable();
                days.dedup();
                ScheduleDays::Days(days)
            }
            _ => ScheduleDays::Malformed(raw.to_string()),
        }
    }

    /// Build from user input; empty → every day. Rejects indices outside 0..=6.
    pub fn from_input(days: &[u8]) -> Result<Self, String> {
        if let Some(bad) = days.iter().find(|d| **d > 6) {
            return Err(format!(
                "weekday index {bad} out of range (0=Monday … 6=Sunday)"
            ));
        }
        if days.is_empty() {
            return Ok(ScheduleDays::EveryDay);
        }
        let mut days = days.to_vec();
        days.sort_unstable();
        days.dedup();
        Ok(ScheduleDays::Days(days))
    }

    /// Column value to store (NULL for every day).
    pub fn to_db(&self) -> Option<String> {
        match self {
            ScheduleDays::EveryDay => None,
            ScheduleDays::Days(days) => serde_json::to_string(days).ok(),
            ScheduleDays::Malformed(raw) => Some(raw.clone()),
        }
    }

    /// Short human label, e.g. `Mo We Fr`.
    pub fn label(&self) -> String {
        const NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
        match self {
            ScheduleDays::EveryDay => "daily".to_string(),
            ScheduleDays::Malformed(_) => "daily (?)".to_string(),
            ScheduleDays::Days(days) => days
                .iter()
                .filter_map(|d| NAMES.get(*d as usize).copied())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn days(&self) -> Option<&[u8]> {
        match self {
            ScheduleDays::Days(days) => Some(days),
            _ => None,
        }
    }
}

impl Serialize for ScheduleDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days().serialize(serializer)
    }
}
