use crate::error::{BriefingError, Result};
use crate::ids;
use crate::types::{AvatarType, ScriptPhase, VideoFormat, VideoType, Voice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Optional fields may be stored as `null` by other clients.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub hook: String,
    pub pain: String,
    pub value: String,
    pub trust: String,
    pub cta: String,
}

impl Script {
    pub fn get(&self, phase: ScriptPhase) -> &str {
        match phase {
            ScriptPhase::Hook => &self.hook,
            ScriptPhase::Pain => &self.pain,
            ScriptPhase::Value => &self.value,
            ScriptPhase::Trust => &self.trust,
            ScriptPhase::Cta => &self.cta,
        }
    }

    pub fn set(&mut self, phase: ScriptPhase, text: impl Into<String>) {
        let slot = match phase {
            ScriptPhase::Hook => &mut self.hook,
            ScriptPhase::Pain => &mut self.pain,
            ScriptPhase::Value => &mut self.value,
            ScriptPhase::Trust => &mut self.trust,
            ScriptPhase::Cta => &mut self.cta,
        };
        *slot = text.into();
    }
}

// ---------------------------------------------------------------------------
// ExtraCharacter
// ---------------------------------------------------------------------------

pub const DEFAULT_CHARACTER_TYPE: &str = "Humano";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCharacter {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// User input for a new cast member, before it gets an id.
#[derive(Debug, Clone, Default)]
pub struct CharacterDraft {
    pub name: String,
    pub kind: Option<String>,
    pub description: String,
    pub image: Option<String>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse `name|type|description|image`; everything after the name may
    /// be omitted. The image is kept as written; see
    /// [`crate::media::image_reference`] for turning a path into a picture.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.splitn(4, '|').map(str::trim);
        let name = parts.next().unwrap_or_default().to_string();
        let kind = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let description = parts.next().unwrap_or_default().to_string();
        let image = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            name,
            kind,
            description,
            image,
        }
    }

    pub fn into_character(self) -> Result<ExtraCharacter> {
        if self.name.trim().is_empty() {
            return Err(BriefingError::Required("character name".to_string()));
        }
        Ok(ExtraCharacter {
            id: ids::generate_id(),
            name: self.name,
            kind: self
                .kind
                .unwrap_or_else(|| DEFAULT_CHARACTER_TYPE.to_string()),
            description: self.description,
            image: self.image,
        })
    }
}

// ---------------------------------------------------------------------------
// BriefingRecord
// ---------------------------------------------------------------------------

/// A video-production brief. `Default` is the new-project template; fields
/// missing from stored JSON take their template value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BriefingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
    pub project_name: String,
    pub video_type: VideoType,
    pub format: VideoFormat,
    /// Seconds.
    pub duration: u32,
    pub objective: String,
    pub assets_link: String,
    pub avatar_type: AvatarType,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_avatar_image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_more_characters: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_characters: Vec<ExtraCharacter>,
    pub script: Script,
    pub visual_style: String,
    pub lighting: String,
    pub color_grading: String,
    pub camera_movement: String,
    pub transition: String,
    pub caption_style: String,
    pub libras: bool,
    pub audio_voice: Voice,
    pub audio_music: String,
    pub negative_prompt: String,
}

impl Default for BriefingRecord {
    fn default() -> Self {
        Self {
            id: None,
            last_modified: None,
            project_name: "Novo Projeto".to_string(),
            video_type: VideoType::Institucional,
            format: VideoFormat::Vertical,
            duration: 60,
            objective: String::new(),
            assets_link: String::new(),
            avatar_type: AvatarType::Human,
            avatar_name: String::new(),
            avatar_url: String::new(),
            uploaded_avatar_image: None,
            has_more_characters: false,
            extra_characters: Vec::new(),
            script: Script::default(),
            visual_style: "Cinemático".to_string(),
            lighting: "Natural".to_string(),
            color_grading: "Padrão".to_string(),
            camera_movement: "Estático".to_string(),
            transition: "Corte Seco".to_string(),
            caption_style: "Moderno".to_string(),
            libras: false,
            audio_voice: Voice::Female,
            audio_music: "pop".to_string(),
            negative_prompt: "Pessoas, ".to_string(),
        }
    }
}

impl BriefingRecord {
    /// A fresh copy of the new-project template.
    pub fn template() -> Self {
        Self::default()
    }

    /// The assigned id, treating an empty string as unassigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    pub fn extra_character(&self, id: &str) -> Option<&ExtraCharacter> {
        self.extra_characters.iter().find(|c| c.id == id)
    }

    /// Current value of a step-owned field, rendered as text.
    pub fn field_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "projectName" => self.project_name.clone(),
            "videoType" => self.video_type.to_string(),
            "format" => self.format.to_string(),
            "duration" => self.duration.to_string(),
            "objective" => self.objective.clone(),
            "assetsLink" => self.assets_link.clone(),
            "avatarType" => self.avatar_type.to_string(),
            "avatarName" => self.avatar_name.clone(),
            "avatarUrl" => self.avatar_url.clone(),
            "uploadedAvatarImage" => self.uploaded_avatar_image.clone().unwrap_or_default(),
            "hasMoreCharacters" => self.has_more_characters.to_string(),
            "visualStyle" => self.visual_style.clone(),
            "lighting" => self.lighting.clone(),
            "colorGrading" => self.color_grading.clone(),
            "cameraMovement" => self.camera_movement.clone(),
            "transition" => self.transition.clone(),
            "captionStyle" => self.caption_style.clone(),
            "libras" => self.libras.to_string(),
            "audioVoice" => self.audio_voice.to_string(),
            "audioMusic" => self.audio_music.clone(),
            "negativePrompt" => self.negative_prompt.clone(),
            other => self.script.get(other.parse().ok()?).to_string(),
        };
        Some(value)
    }

    /// Apply a patch in place. Only the fields the patch names change.
    pub fn merge(&mut self, patch: BriefingPatch) {
        patch.apply_to(self);
    }
}

// ---------------------------------------------------------------------------
// BriefingPatch
// ---------------------------------------------------------------------------

/// A partial update. `None` leaves the corresponding field untouched; script
/// slots are updated individually so one phase never clobbers another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BriefingPatch {
    pub project_name: Option<String>,
    pub video_type: Option<VideoType>,
    pub format: Option<VideoFormat>,
    pub duration: Option<u32>,
    pub objective: Option<String>,
    pub assets_link: Option<String>,
    pub avatar_type: Option<AvatarType>,
    pub avatar_name: Option<String>,
    pub avatar_url: Option<String>,
    pub uploaded_avatar_image: Option<String>,
    pub has_more_characters: Option<bool>,
    pub extra_characters: Option<Vec<ExtraCharacter>>,
    pub script: Vec<(ScriptPhase, String)>,
    pub visual_style: Option<String>,
    pub lighting: Option<String>,
    pub color_grading: Option<String>,
    pub camera_movement: Option<String>,
    pub transition: Option<String>,
    pub caption_style: Option<String>,
    pub libras: Option<bool>,
    pub audio_voice: Option<Voice>,
    pub audio_music: Option<String>,
    pub negative_prompt: Option<String>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl BriefingPatch {
    pub fn script_slot(phase: ScriptPhase, text: impl Into<String>) -> Self {
        Self {
            script: vec![(phase, text.into())],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, record: &mut BriefingRecord) {
        set(&mut record.project_name, self.project_name);
        set(&mut record.video_type, self.video_type);
        set(&mut record.format, self.format);
        set(&mut record.duration, self.duration);
        set(&mut record.objective, self.objective);
        set(&mut record.assets_link, self.assets_link);
        set(&mut record.avatar_type, self.avatar_type);
        set(&mut record.avatar_name, self.avatar_name);
        set(&mut record.avatar_url, self.avatar_url);
        if let Some(image) = self.uploaded_avatar_image {
            record.uploaded_avatar_image = Some(image);
        }
        set(&mut record.has_more_characters, self.has_more_characters);
        set(&mut record.extra_characters, self.extra_characters);
        for (phase, text) in self.script {
            record.script.set(phase, text);
        }
        set(&mut record.visual_style, self.visual_style);
        set(&mut record.lighting, self.lighting);
        set(&mut record.color_grading, self.color_grading);
        set(&mut record.camera_movement, self.camera_movement);
        set(&mut record.transition, self.transition);
        set(&mut record.caption_style, self.caption_style);
        set(&mut record.libras, self.libras);
        set(&mut record.audio_voice, self.audio_voice);
        set(&mut record.audio_music, self.audio_music);
        set(&mut record.negative_prompt, self.negative_prompt);
    }
}

// ---------------------------------------------------------------------------
// Patch builders for list-valued fields
// ---------------------------------------------------------------------------

/// Patch appending a new cast member. Returns the patch and the new id.
pub fn add_extra_character(
    record: &BriefingRecord,
    draft: CharacterDraft,
) -> Result<(BriefingPatch, String)> {
    let character = draft.into_character()?;
    let id = character.id.clone();
    let mut list = record.extra_characters.clone();
    list.push(character);
    let patch = BriefingPatch {
        extra_characters: Some(list),
        ..BriefingPatch::default()
    };
    Ok((patch, id))
}

/// Patch dropping the cast member with `id`. An unknown id yields a patch
/// that leaves the list as it is.
pub fn remove_extra_character(record: &BriefingRecord, id: &str) -> BriefingPatch {
    let list = record
        .extra_characters
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();
    BriefingPatch {
        extra_characters: Some(list),
        ..BriefingPatch::default()
    }
}

/// Patch choosing the main avatar. Catalogue avatars bring their stock
/// picture along; the others leave `avatarUrl` alone.
pub fn select_avatar(kind: AvatarType) -> BriefingPatch {
    BriefingPatch {
        avatar_type: Some(kind),
        avatar_url: kind.preset_image().map(str::to_string),
        ..BriefingPatch::default()
    }
}

/// Patch for a user-supplied avatar picture. The public URL no longer
/// applies, so it is cleared.
pub fn upload_avatar(image: impl Into<String>) -> BriefingPatch {
    BriefingPatch {
        avatar_type: Some(AvatarType::Upload),
        uploaded_avatar_image: Some(image.into()),
        avatar_url: Some(String::new()),
        ..BriefingPatch::default()
    }
}

/// Patch toggling a comma-separated tag in the negative prompt.
pub fn toggle_negative_tag(record: &BriefingRecord, tag: &str) -> BriefingPatch {
    let current = record.negative_prompt.as_str();
    let next = if current.contains(tag) {
        current
            .replacen(&format!("{tag}, "), "", 1)
            .replacen(tag, "", 1)
            .trim()
            .to_string()
    } else if current.is_empty() {
        tag.to_string()
    } else {
        format!("{current}, {tag}")
    };
    BriefingPatch {
        negative_prompt: Some(next),
        ..BriefingPatch::default()
    }
}

/// `45s`, `1m 30s`, `2m `.
pub fn format_duration(seconds: u32) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    if m == 0 {
        return format!("{s}s");
    }
    if s > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{m}m ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
