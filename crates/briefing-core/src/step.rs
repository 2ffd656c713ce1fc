//! The eight wizard steps and the fields each one owns.
//!
//! A screen turns `key=value` input into a [`BriefingPatch`] through
//! [`Step::parse_field`]. Keys outside the step's own field set are
//! rejected, so a screen can never write a field another step owns.

use crate::error::{BriefingError, Result};
use crate::record::{self, BriefingPatch};
use crate::types::ScriptPhase;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ProjectDetails,
    Avatar,
    Script,
    ArtDirection,
    CameraEditing,
    Audio,
    NegativePrompt,
    Review,
}

pub const TOTAL_STEPS: u8 = 8;

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Step::ProjectDetails,
            Step::Avatar,
            Step::Script,
            Step::ArtDirection,
            Step::CameraEditing,
            Step::Audio,
            Step::NegativePrompt,
            Step::Review,
        ]
    }

    pub fn first() -> Step {
        Step::ProjectDetails
    }

    /// 1-based position.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Result<Step> {
        n.checked_sub(1)
            .and_then(|i| Step::all().get(i as usize).copied())
            .ok_or_else(|| BriefingError::InvalidStep(n.to_string()))
    }

    pub fn next(self) -> Option<Step> {
        Step::all().get(self as usize + 1).copied()
    }

    pub fn prev(self) -> Option<Step> {
        (self as usize)
            .checked_sub(1)
            .and_then(|i| Step::all().get(i).copied())
    }

    pub fn is_last(self) -> bool {
        self == Step::Review
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::ProjectDetails => "project_details",
            Step::Avatar => "avatar",
            Step::Script => "script",
            Step::ArtDirection => "art_direction",
            Step::CameraEditing => "camera_editing",
            Step::Audio => "audio",
            Step::NegativePrompt => "negative_prompt",
            Step::Review => "review",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::ProjectDetails => "Detalhes do Projeto",
            Step::Avatar => "Avatar & Elenco",
            Step::Script => "Estrutura do Roteiro",
            Step::ArtDirection => "Direção de Arte",
            Step::CameraEditing => "Câmera & Edição",
            Step::Audio => "Áudio",
            Step::NegativePrompt => "Prompt Negativo",
            Step::Review => "Revisão Final",
        }
    }

    /// Field keys this step may write, as they appear in stored JSON.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Step::ProjectDetails => &[
                "projectName",
                "videoType",
                "format",
                "duration",
                "objective",
                "assetsLink",
            ],
            Step::Avatar => &[
                "avatarType",
                "avatarName",
                "avatarUrl",
                "uploadedAvatarImage",
                "hasMoreCharacters",
            ],
            Step::Script => &["hook", "pain", "value", "trust", "cta"],
            Step::ArtDirection => &["visualStyle", "lighting", "colorGrading"],
            Step::CameraEditing => &["cameraMovement", "transition", "captionStyle", "libras"],
            Step::Audio => &["audioVoice", "audioMusic"],
            Step::NegativePrompt => &["negativePrompt"],
            Step::Review => &[],
        }
    }

    pub fn owns(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// Translate one `key=value` input into a patch over this step's fields.
    pub fn parse_field(self, key: &str, value: &str) -> Result<BriefingPatch> {
        if !self.owns(key) {
            return Err(BriefingError::UnknownField {
                step: self.as_str().to_string(),
                field: key.to_string(),
            });
        }
        let text = || Some(value.to_string());
        let mut patch = BriefingPatch::default();
        match key {
            "projectName" => patch.project_name = text(),
            "videoType" => patch.video_type = Some(value.parse()?),
            "format" => patch.format = Some(value.parse()?),
            "duration" => patch.duration = Some(parse_number(key, value)?),
            "objective" => patch.objective = text(),
            "assetsLink" => patch.assets_link = text(),
            "avatarType" => patch = record::select_avatar(value.parse()?),
            "avatarName" => patch.avatar_name = text(),
            "avatarUrl" => patch.avatar_url = text(),
            "uploadedAvatarImage" => patch = record::upload_avatar(value),
            "hasMoreCharacters" => patch.has_more_characters = Some(parse_flag(key, value)?),
            "hook" | "pain" | "value" | "trust" | "cta" => {
                let phase: ScriptPhase = key.parse()?;
                patch.script.push((phase, value.to_string()));
            }
            "visualStyle" => patch.visual_style = text(),
            "lighting" => patch.lighting = text(),
            "colorGrading" => patch.color_grading = text(),
            "cameraMovement" => patch.camera_movement = text(),
            "transition" => patch.transition = text(),
            "captionStyle" => patch.caption_style = text(),
            "libras" => patch.libras = Some(parse_flag(key, value)?),
            "audioVoice" => patch.audio_voice = Some(value.parse()?),
            "audioMusic" => patch.audio_music = text(),
            "negativePrompt" => patch.negative_prompt = text(),
            _ => {
                return Err(BriefingError::UnknownField {
                    step: self.as_str().to_string(),
                    field: key.to_string(),
                })
            }
        }
        Ok(patch)
    }
}

fn parse_number(field: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| BriefingError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "yes" | "sim" | "1" => Ok(true),
        "false" | "no" | "não" | "nao" | "0" => Ok(false),
        _ => Err(BriefingError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
