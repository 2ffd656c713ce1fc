use crate::error::BriefingError;
use serde::{Deserialize, Serialize};
use std::fmt;

fn invalid(field: &str, value: &str) -> BriefingError {
    BriefingError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// VideoType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    #[default]
    Institucional,
    Propaganda,
    Venda,
    Educacional,
    Outros,
}

impl VideoType {
    pub fn all() -> &'static [VideoType] {
        &[
            VideoType::Institucional,
            VideoType::Propaganda,
            VideoType::Venda,
            VideoType::Educacional,
            VideoType::Outros,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::Institucional => "institucional",
            VideoType::Propaganda => "propaganda",
            VideoType::Venda => "venda",
            VideoType::Educacional => "educacional",
            VideoType::Outros => "outros",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VideoType::Institucional => "Institucional",
            VideoType::Propaganda => "Propaganda",
            VideoType::Venda => "Venda Prod.",
            VideoType::Educacional => "Educacional",
            VideoType::Outros => "Outros",
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoType {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "institucional" => Ok(VideoType::Institucional),
            "propaganda" => Ok(VideoType::Propaganda),
            "venda" => Ok(VideoType::Venda),
            "educacional" => Ok(VideoType::Educacional),
            "outros" => Ok(VideoType::Outros),
            _ => Err(invalid("videoType", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// VideoFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFormat {
    #[default]
    Vertical,
    Horizontal,
}

impl VideoFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoFormat::Vertical => "vertical",
            VideoFormat::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoFormat {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(VideoFormat::Vertical),
            "horizontal" => Ok(VideoFormat::Horizontal),
            _ => Err(invalid("format", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// AvatarType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarType {
    Clone,
    #[default]
    Human,
    Mascot,
    AudioOnly,
    Upload,
}

impl AvatarType {
    pub fn all() -> &'static [AvatarType] {
        &[
            AvatarType::Clone,
            AvatarType::Human,
            AvatarType::Mascot,
            AvatarType::AudioOnly,
            AvatarType::Upload,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AvatarType::Clone => "clone",
            AvatarType::Human => "human",
            AvatarType::Mascot => "mascot",
            AvatarType::AudioOnly => "audio_only",
            AvatarType::Upload => "upload",
        }
    }

    /// Stock picture that comes with a catalogue avatar.
    pub fn preset_image(self) -> Option<&'static str> {
        match self {
            AvatarType::Clone => Some(CLONE_IMAGE),
            AvatarType::Human => Some(HUMAN_IMAGE),
            AvatarType::Mascot => Some(MASCOT_IMAGE),
            AvatarType::AudioOnly | AvatarType::Upload => None,
        }
    }
}

const CLONE_IMAGE: &str =
    "https://images.unsplash.com/photo-1544723795-3fb6469f5b39?auto=format&fit=crop&q=80&w=400";
const HUMAN_IMAGE: &str =
    "https://images.unsplash.com/photo-1560250097-0b93528c311a?auto=format&fit=crop&q=80&w=400";
const MASCOT_IMAGE: &str =
    "https://images.unsplash.com/photo-1634896941598-b6b500a502a7?q=80&w=400&auto=format&fit=crop";

impl fmt::Display for AvatarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AvatarType {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clone" => Ok(AvatarType::Clone),
            "human" => Ok(AvatarType::Human),
            "mascot" => Ok(AvatarType::Mascot),
            "audio_only" | "audio-only" => Ok(AvatarType::AudioOnly),
            "upload" => Ok(AvatarType::Upload),
            _ => Err(invalid("avatarType", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    Male,
    #[default]
    Female,
}

impl Voice {
    pub fn as_str(self) -> &'static str {
        match self {
            Voice::Male => "male",
            Voice::Female => "female",
        }
    }

    /// Portuguese label used in the share payload.
    pub fn label(self) -> &'static str {
        match self {
            Voice::Male => "Masculina",
            Voice::Female => "Feminina",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Voice {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Voice::Male),
            "female" => Ok(Voice::Female),
            _ => Err(invalid("audioVoice", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptPhase
// ---------------------------------------------------------------------------

/// The five narrative slots of a script, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPhase {
    Hook,
    Pain,
    Value,
    Trust,
    Cta,
}

impl ScriptPhase {
    pub fn all() -> &'static [ScriptPhase] {
        &[
            ScriptPhase::Hook,
            ScriptPhase::Pain,
            ScriptPhase::Value,
            ScriptPhase::Trust,
            ScriptPhase::Cta,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScriptPhase::Hook => "hook",
            ScriptPhase::Pain => "pain",
            ScriptPhase::Value => "value",
            ScriptPhase::Trust => "trust",
            ScriptPhase::Cta => "cta",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScriptPhase::Hook => "Gancho (Hook)",
            ScriptPhase::Pain => "Problema (Pain)",
            ScriptPhase::Value => "Solução (Value)",
            ScriptPhase::Trust => "Autoridade (Trust)",
            ScriptPhase::Cta => "Chamada (CTA)",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ScriptPhase::Hook => "Chame a atenção nos primeiros 3 segundos.",
            ScriptPhase::Pain => "Conecte-se com a dor do cliente.",
            ScriptPhase::Value => "Apresente seu produto/serviço.",
            ScriptPhase::Trust => "Por que confiar em você?",
            ScriptPhase::Cta => "O que o cliente deve fazer agora?",
        }
    }

    /// Time window within a 60 second cut.
    pub fn window(self) -> &'static str {
        match self {
            ScriptPhase::Hook => "0-3s",
            ScriptPhase::Pain => "3-15s",
            ScriptPhase::Value => "15-40s",
            ScriptPhase::Trust => "40-50s",
            ScriptPhase::Cta => "50-60s",
        }
    }
}

impl fmt::Display for ScriptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScriptPhase {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hook" => Ok(ScriptPhase::Hook),
            "pain" => Ok(ScriptPhase::Pain),
            "value" => Ok(ScriptPhase::Value),
            "trust" => Ok(ScriptPhase::Trust),
            "cta" => Ok(ScriptPhase::Cta),
            _ => Err(invalid("script", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
