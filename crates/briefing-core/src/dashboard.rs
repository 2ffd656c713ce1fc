use crate::error::{BriefingError, Result};
use crate::record::BriefingRecord;
use crate::store::BriefingStore;
use crate::types::VideoType;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// One card on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub video_type: VideoType,
    pub date: String,
    pub blurb: String,
    pub duration: u32,
    pub visual_style: String,
}

impl ProjectSummary {
    pub fn from_record(record: &BriefingRecord) -> Option<Self> {
        let id = record.id()?.to_string();
        let title = non_empty(&record.project_name).unwrap_or("Sem Nome");
        let blurb = non_empty(&record.script.hook)
            .or_else(|| non_empty(&record.objective))
            .unwrap_or("Sem descrição...");
        Some(Self {
            id,
            title: title.to_string(),
            video_type: record.video_type,
            date: record.last_modified.map(date_label).unwrap_or_default(),
            blurb: blurb.to_string(),
            duration: record.duration,
            visual_style: record.visual_style.clone(),
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `18 out`: day of month and Portuguese month abbreviation.
pub fn date_label(ts: DateTime<Utc>) -> String {
    format!("{:02} {}", ts.day(), MONTHS_PT[ts.month0() as usize])
}

/// List view over the store. Holds the entries it last rendered and
/// refreshes them from the store after every delete.
pub struct Dashboard<S> {
    store: S,
    entries: Vec<ProjectSummary>,
}

impl<S: BriefingStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        let mut dashboard = Self {
            store,
            entries: Vec::new(),
        };
        dashboard.refresh();
        dashboard
    }

    pub fn refresh(&mut self) {
        self.entries = self
            .store
            .list_all()
            .iter()
            .filter_map(ProjectSummary::from_record)
            .collect();
    }

    pub fn entries(&self) -> &[ProjectSummary] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn new_project(&self) -> BriefingRecord {
        BriefingRecord::template()
    }

    pub fn open(&self, id: &str) -> Result<BriefingRecord> {
        self.store
            .get(id)
            .ok_or_else(|| BriefingError::RecordNotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let outcome = self.store.remove(id);
        self.refresh();
        outcome
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
