//! Askama templates for the server list page.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::cache::Snapshot;
use crate::lookup::{platform_label, region_label};
use crate::steam::ServerRecord;

/// The server list page.
#[derive(Template)]
#[template(path = "list.html")]
pub struct ServerListTemplate {
    pub servers: Vec<ServerView>,
    /// Sum of human players across all servers, saturating.
    pub total_players: i64,
    /// When the list was fetched, or `None` if it never was.
    pub updated: Option<String>,
}

impl ServerListTemplate {
    /// Build the page model from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let servers: Vec<ServerView> = snapshot
            .servers()
            .iter()
            .map(ServerView::from_record)
            .collect();

        let total_players = servers
            .iter()
            .fold(0i64, |total, s| total.saturating_add(s.human_players()));

        Self {
            servers,
            total_players,
            updated: snapshot.fetched_at().map(format_timestamp),
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Server row view model.
#[derive(Debug, Clone)]
pub struct ServerView {
    pub name: String,
    pub map: String,
    pub game_type: String,
    pub players: i64,
    pub max_players: i64,
    pub bots: i64,
    pub region: &'static str,
    pub platform: &'static str,
    pub version: String,
    pub secure: bool,
    pub dedicated: bool,
    pub connect_address: String,
}

impl ServerView {
    /// Create from a directory record, resolving the code labels.
    pub fn from_record(record: &ServerRecord) -> Self {
        Self {
            name: record.name.clone(),
            map: record.map.clone(),
            game_type: record.game_type.clone(),
            players: record.players,
            max_players: record.max_players,
            bots: record.bots,
            region: region_label(record.region),
            platform: platform_label(&record.os),
            version: record.version.clone(),
            secure: record.secure,
            dedicated: record.dedicated,
            connect_address: record.connect_address(),
        }
    }

    /// Players that are not bots. The directory counts bots as players.
    /// Never negative, whatever upstream reports.
    pub fn human_players(&self) -> i64 {
        self.players.saturating_sub(self.bots).max(0)
    }

    /// Whether the server has no free slots.
    pub fn is_full(&self) -> bool {
        self.max_players > 0 && self.players >= self.max_players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ServerRecord {
        ServerRecord {
            addr: "203.0.113.7:27016".into(),
            game_port: 27015,
            name: "Sandbox <Classic> & Co".into(),
            app_id: 4000,
            version: "1.0.0.12".into(),
            region: 3,
            players: 12,
            max_players: 24,
            bots: 2,
            map: "gm_construct".into(),
            secure: true,
            dedicated: true,
            os: "l".into(),
            game_type: "sandbox".into(),
            ..Default::default()
        }
    }

    #[test]
    fn view_resolves_labels() {
        let view = ServerView::from_record(&record());
        assert_eq!(view.region, "Europe");
        assert_eq!(view.platform, "Linux");
        assert_eq!(view.connect_address, "203.0.113.7:27015");
        assert_eq!(view.human_players(), 10);
        assert!(!view.is_full());
    }

    #[test]
    fn view_unknown_codes_fall_back() {
        let view = ServerView::from_record(&ServerRecord {
            region: 255,
            os: "x".into(),
            ..record()
        });
        assert_eq!(view.region, "World");
        assert_eq!(view.platform, "Other");
    }

    #[test]
    fn bots_exceeding_players_do_not_underflow() {
        let view = ServerView::from_record(&ServerRecord {
            players: 1,
            bots: 4,
            ..record()
        });
        assert_eq!(view.human_players(), 0);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let view = ServerView::from_record(&ServerRecord {
            players: -1,
            bots: 0,
            ..record()
        });
        assert_eq!(view.human_players(), 0);

        let view = ServerView::from_record(&ServerRecord {
            players: 5,
            bots: i64::MIN,
            ..record()
        });
        assert_eq!(view.human_players(), i64::MAX);
    }

    #[test]
    fn huge_player_counts_saturate_the_total() {
        let huge = ServerRecord {
            players: i64::MAX,
            bots: 0,
            ..record()
        };
        let snapshot = Snapshot::new(vec![huge.clone(), huge], Utc::now());

        let template = ServerListTemplate::from_snapshot(&snapshot);
        assert_eq!(template.total_players, i64::MAX);
        assert!(template.render().is_ok());
    }

    #[test]
    fn full_server() {
        let view = ServerView::from_record(&ServerRecord {
            players: 24,
            ..record()
        });
        assert!(view.is_full());
    }

    #[test]
    fn render_lists_servers_in_order() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 5).unwrap();
        let second = ServerRecord {
            name: "Prop Hunt Night".into(),
            region: 0,
            os: "w".into(),
            ..record()
        };
        let snapshot = Snapshot::new(vec![record(), second], at);

        let template = ServerListTemplate::from_snapshot(&snapshot);
        assert_eq!(template.total_players, 20);

        let html = template.render().unwrap();
        assert!(html.contains("2024-06-01 12:00:05 UTC"));
        assert!(html.contains("Europe"));
        assert!(html.contains("US - East"));
        assert!(html.contains("Windows"));

        // Names are escaped
        assert!(html.contains("Sandbox &lt;Classic&gt; &amp; Co"));
        assert!(!html.contains("<Classic>"));

        let first = html.find("Sandbox").unwrap();
        let second = html.find("Prop Hunt Night").unwrap();
        assert!(first < second);
    }

    #[test]
    fn render_empty_snapshot() {
        let template = ServerListTemplate::from_snapshot(&Snapshot::empty());
        assert!(template.servers.is_empty());
        assert!(template.updated.is_none());

        let html = template.render().unwrap();
        assert!(html.contains("No servers"));
    }
}
