//! Wizard controller: the current step plus a working copy of the record.
//!
//! Forward navigation auto-saves through a [`BriefingStore`]. A failed save
//! is logged and navigation continues with the in-memory record; the first
//! successful save hands back an id which the controller adopts, so later
//! saves update that entry instead of creating another.

use crate::error::{BriefingError, Result};
use crate::record::{self, BriefingPatch, BriefingRecord, CharacterDraft};
use crate::share::{self, ShareTarget};
use crate::step::Step;
use crate::store::BriefingStore;
use serde::Serialize;
use tracing::{debug, warn};

/// Result of a backward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(Step),
    /// Backed out of the first step: return to the dashboard.
    Exit,
}

/// What `finish` produced. The wizard is over once this is returned.
#[derive(Debug, Clone, Serialize)]
pub struct Finished {
    pub record: BriefingRecord,
    pub payload: String,
    pub saved: bool,
    pub shared: bool,
}

pub struct Wizard<S> {
    store: S,
    step: Step,
    record: BriefingRecord,
}

impl<S: BriefingStore> Wizard<S> {
    /// Enter the wizard at step 1 with a template or loaded record.
    pub fn new(store: S, record: BriefingRecord) -> Self {
        Self {
            store,
            step: Step::first(),
            record,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &BriefingRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Field updates
    // -----------------------------------------------------------------------

    pub fn merge(&mut self, patch: BriefingPatch) {
        self.record.merge(patch);
    }

    /// Parse `key=value` input for the current step and merge it.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        let patch = self.step.parse_field(key, value)?;
        self.merge(patch);
        Ok(())
    }

    pub fn add_extra_character(&mut self, draft: CharacterDraft) -> Result<String> {
        let (patch, id) = record::add_extra_character(&self.record, draft)?;
        self.merge(patch);
        Ok(id)
    }

    pub fn remove_extra_character(&mut self, id: &str) {
        let patch = record::remove_extra_character(&self.record, id);
        self.merge(patch);
    }

    /// Use a picture of the user's own as the main avatar.
    pub fn upload_avatar(&mut self, image: impl Into<String>) {
        self.merge(record::upload_avatar(image));
    }

    pub fn toggle_negative_tag(&mut self, tag: &str) {
        let patch = record::toggle_negative_tag(&self.record, tag);
        self.merge(patch);
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Save, then move one step forward. A no-op on the review step, which
    /// only finishes.
    pub fn advance(&mut self) -> Step {
        let Some(next) = self.step.next() else {
            return self.step;
        };
        self.save();
        self.step = next;
        debug!(step = %self.step, "advanced");
        self.step
    }

    pub fn retreat(&mut self) -> Navigation {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                Navigation::Moved(prev)
            }
            None => Navigation::Exit,
        }
    }

    /// Revisit an earlier step from the review screen. Does not save.
    pub fn jump_to(&mut self, target: Step) -> Result<Step> {
        if !self.step.is_last() {
            return Err(BriefingError::InvalidTransition {
                from: self.step.to_string(),
                action: "jump".to_string(),
                reason: "only the review step can jump".to_string(),
            });
        }
        self.step = target;
        Ok(target)
    }

    /// Hand the share payload to `target`, save, and end the wizard.
    ///
    /// Neither a share failure nor a save failure stops the finish; both are
    /// logged and reported in the returned [`Finished`].
    pub fn finish(&mut self, target: &mut dyn ShareTarget) -> Result<Finished> {
        if !self.step.is_last() {
            return Err(BriefingError::InvalidTransition {
                from: self.step.to_string(),
                action: "finish".to_string(),
                reason: "finish is only available on the review step".to_string(),
            });
        }

        let payload = share::format_payload(&self.record);
        let shared = match target.share(&payload) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "share failed, finishing anyway");
                false
            }
        };
        let saved = self.save();

        Ok(Finished {
            record: self.record.clone(),
            payload,
            saved,
            shared,
        })
    }

    /// Best-effort persistence. Returns whether the store accepted the save.
    fn save(&mut self) -> bool {
        match self.store.upsert(&self.record) {
            Ok(stored) => {
                if !self.record.is_persisted() {
                    if let Some(id) = stored.id() {
                        self.record.id = Some(id.to_string());
                    }
                }
                true
            }
            Err(e) => {
                warn!(error = %e, step = %self.step, "auto-save failed, continuing navigation anyway");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
