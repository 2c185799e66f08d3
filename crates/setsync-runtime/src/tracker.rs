use std::time::Duration;

use chrono::FixedOffset;
use serde_json::json;
use setsync_types::{MuscleGroup, parse_datetime};

use crate::{Error, Result};

const NOTION_VERSION: &str = "2022-06-28";

/// One set shaped for delivery to the external tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerRecord {
    pub id: String,
    pub date: String,
    pub exercise_name: String,
    pub set_index: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub is_warmup: bool,
    pub muscle_groups: Vec<MuscleGroup>,
    pub notes: Option<String>,
}

/// Destination for pushed sets. One call per record; a failure affects only
/// that record.
pub trait TrackerSink {
    fn deliver(&mut self, record: &TrackerRecord) -> Result<()>;
}

/// Notion client over the pages endpoint. Each record becomes one page in
/// the configured database.
pub struct NotionTracker {
    client: reqwest::blocking::Client,
    api_base: String,
    token: String,
    database_id: String,
    offset: FixedOffset,
}

impl NotionTracker {
    pub fn new(
        api_base: &str,
        token: &str,
        database_id: &str,
        utc_offset: &str,
    ) -> Result<Self> {
        let offset = parse_offset(utc_offset)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            database_id: database_id.to_string(),
            offset,
        })
    }

    fn page_payload(&self, record: &TrackerRecord) -> Result<serde_json::Value> {
        let iso_date = localize(&record.date, self.offset)?;

        let groups: Vec<serde_json::Value> = record
            .muscle_groups
            .iter()
            .map(|g| json!({ "name": g.as_str() }))
            .collect();

        let notes = record.notes.as_deref().unwrap_or("");

        Ok(json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "Date": { "date": { "start": iso_date } },
                "Set Index": { "number": record.set_index },
                "Exercise": {
                    "title": [{ "text": { "content": record.exercise_name } }]
                },
                "Weight": { "number": record.weight },
                "Reps": { "number": record.reps },
                "Is Warmup": { "checkbox": record.is_warmup },
                "Muscle Groups": { "multi_select": groups },
                "Notes": {
                    "rich_text": [{ "text": { "content": notes } }]
                }
            }
        }))
    }
}

impl TrackerSink for NotionTracker {
    fn deliver(&mut self, record: &TrackerRecord) -> Result<()> {
        let payload = self.page_payload(record)?;
        let url = format!("{}/v1/pages", self.api_base);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Delivery(format!(
                "tracker returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// Parse a fixed offset such as "-06:00" or "+05:30".
pub fn parse_offset(spec: &str) -> Result<FixedOffset> {
    let err = || Error::Config(format!("invalid utc_offset '{}'", spec));

    let (sign, rest) = match spec.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(err()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(err)?;
    let hours: i32 = hours.parse().map_err(|_| err())?;
    let minutes: i32 = minutes.parse().map_err(|_| err())?;
    if hours > 23 || minutes > 59 {
        return Err(err());
    }

    let seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(seconds).ok_or_else(err)
}

/// Stamp a stored timestamp with the configured offset, RFC 3339.
fn localize(date: &str, offset: FixedOffset) -> Result<String> {
    let naive = parse_datetime(date)
        .ok_or_else(|| Error::Delivery(format!("unparseable date '{}'", date)))?;

    let localized = naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| Error::Delivery(format!("ambiguous local time '{}'", date)))?;

    Ok(localized.to_rfc3339())
}
