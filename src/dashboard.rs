//! Dashboard stats panel data and the refresh hook that loads it.

use crate::api::ApiClient;
use crate::format::format_time;
use crate::poller::DashboardRefresh;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Endpoint polled by the dashboard
pub const STATS_ENDPOINT: &str = "/dashboard/stats";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub inside_count: u64,
    pub total_students: u64,
    pub today_entries: u64,
    pub today_exits: u64,
}

/// One scan from the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Option<u64>,
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub rfid_uid: Option<String>,
    /// `ENTRY` or `EXIT`
    pub action: String,
    pub timestamp: Option<String>,
    pub device_id: Option<String>,
    pub zone: Option<String>,
}

impl ActivityEntry {
    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.action.eq_ignore_ascii_case("entry")
    }

    /// `Asha Rao ENTRY 02:30 PM` style summary line
    #[must_use]
    pub fn summary(&self) -> String {
        let who = self
            .student_name
            .as_deref()
            .or(self.rfid_uid.as_deref())
            .unwrap_or("Unknown");
        let at = format_time(self.timestamp.as_deref().unwrap_or_default());
        format!("{who} {} {at}", self.action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntries {
    pub hour: u8,
    pub entries: u64,
}

/// Body of `GET /api/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub success: bool,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub hourly_data: Vec<HourlyEntries>,
}

impl DashboardData {
    /// Hour of the day with the most entries, earliest on ties
    #[must_use]
    pub fn busiest_hour(&self) -> Option<HourlyEntries> {
        self.hourly_data
            .iter()
            .copied()
            .filter(|h| h.entries > 0)
            .fold(None, |best: Option<HourlyEntries>, h| match best {
                Some(b) if b.entries >= h.entries => Some(b),
                _ => Some(h),
            })
    }
}

/// Refresh hook that fetches the stats endpoint and keeps the latest
/// successful snapshot.
pub struct DashboardLoader {
    api: ApiClient,
    latest: RwLock<Option<DashboardData>>,
}

impl DashboardLoader {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            latest: RwLock::new(None),
        }
    }

    /// Latest successfully loaded snapshot
    #[must_use]
    pub fn latest(&self) -> Option<DashboardData> {
        self.latest.read().ok().and_then(|latest| latest.clone())
    }

    /// Fetch the stats once. Returns whether the snapshot was replaced.
    pub async fn load(&self) -> bool {
        let Some(body) = self.api.get(STATS_ENDPOINT).await else {
            return false;
        };

        let data: DashboardData = match serde_json::from_value(body) {
            Ok(data) => data,
            Err(e) => {
                warn!("Unexpected dashboard payload: {e}");
                return false;
            }
        };

        if !data.success {
            warn!("Dashboard stats request was rejected; keeping previous snapshot");
            return false;
        }

        info!(
            "Dashboard: {} inside, {} students, {} entries / {} exits today",
            data.stats.inside_count,
            data.stats.total_students,
            data.stats.today_entries,
            data.stats.today_exits
        );
        if let Some(latest) = data.recent_activity.first() {
            debug!("Latest activity: {}", latest.summary());
        }

        match self.latest.write() {
            Ok(mut latest) => {
                *latest = Some(data);
                true
            }
            Err(e) => {
                error!("Failed to acquire dashboard write lock: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl DashboardRefresh for DashboardLoader {
    async fn refresh(&self) {
        self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "success": true,
        "stats": {"inside_count": 3, "total_students": 40, "today_entries": 12, "today_exits": 9},
        "recent_activity": [
            {"id": 7, "student_name": "Asha Rao", "rfid_uid": "A1B2C3D4", "action": "ENTRY", "timestamp": "2024-01-15T14:30:00Z", "device_id": "GATE_01", "zone": null}
        ],
        "hourly_data": [{"hour": 9, "entries": 4}, {"hour": 10, "entries": 6}, {"hour": 14, "entries": 6}]
    }"#;

    #[test]
    fn test_decode_stats_payload() {
        let data: DashboardData = serde_json::from_str(SAMPLE).unwrap();
        assert!(data.success);
        assert_eq!(data.stats.inside_count, 3);
        assert_eq!(data.stats.today_exits, 9);
        assert_eq!(data.recent_activity.len(), 1);
        assert!(data.recent_activity[0].is_entry());
        assert_eq!(data.hourly_data.len(), 3);
    }

    #[test]
    fn test_busiest_hour_prefers_earliest_tie() {
        let data: DashboardData = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            data.busiest_hour(),
            Some(HourlyEntries {
                hour: 10,
                entries: 6
            })
        );
    }

    #[test]
    fn test_busiest_hour_empty_day() {
        let data: DashboardData =
            serde_json::from_str(r#"{"success": true, "hourly_data": [{"hour": 0, "entries": 0}]}"#)
                .unwrap();
        assert!(data.busiest_hour().is_none());
        assert_eq!(data.stats, DashboardStats::default());
    }

    #[test]
    fn test_activity_summary_falls_back_to_uid() {
        let entry: ActivityEntry = serde_json::from_str(
            r#"{"student_name": null, "rfid_uid": "A1B2C3D4", "action": "EXIT", "timestamp": null}"#,
        )
        .unwrap();
        assert!(!entry.is_entry());
        assert_eq!(entry.summary(), "A1B2C3D4 EXIT ");
    }
}
