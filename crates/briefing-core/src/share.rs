//! Share payload: the text summary handed to a messaging app when a
//! briefing is finished.

use crate::error::Result;
use crate::record::BriefingRecord;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const NOT_PROVIDED: &str = "Não informado";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://wa.me/?text=";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The external collaborator that receives a finished briefing.
pub trait ShareTarget {
    fn share(&mut self, payload: &str) -> Result<()>;
}

impl<F> ShareTarget for F
where
    F: FnMut(&str) -> Result<()>,
{
    fn share(&mut self, payload: &str) -> Result<()> {
        self(payload)
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn extras_section(record: &BriefingRecord) -> String {
    if record.extra_characters.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = record
        .extra_characters
        .iter()
        .map(|c| format!("- {} ({}): {}", c.name, c.kind, c.description))
        .collect();
    format!("\n\n👥 *Elenco Extra:*\n{}", lines.join("\n"))
}

/// Render the fixed-template summary of `record`.
pub fn format_payload(record: &BriefingRecord) -> String {
    format!(
        "
🎬 *NOVO BRIEFING DE VÍDEO* 🎬

📌 *Projeto:* {project}
📹 *Tipo:* {video_type}
📐 *Formato:* {format}
⏱️ *Duração:* {duration}s

🎯 *Objetivo:*
{objective}

🎭 *Direção de Arte:*
- Estilo: {style}
- Iluminação: {lighting}

🎥 *Câmera & Edição:*
- Movimento: {camera}
- Transição: {transition}
- Legenda: {caption}

🔊 *Áudio:*
- Voz: {voice}
- Música: {music}

👤 *Avatar Principal:* {avatar_type}
- Nome: {avatar_name}{extras}

📝 *Roteiro Resumido:*
Hook: {hook}
CTA: {cta}

🤖 *Gerado por Briefing.AI*
",
        project = record.project_name,
        video_type = record.video_type,
        format = record.format,
        duration = record.duration,
        objective = or_placeholder(&record.objective),
        style = record.visual_style,
        lighting = record.lighting,
        camera = record.camera_movement,
        transition = record.transition,
        caption = record.caption_style,
        voice = record.audio_voice.label(),
        music = record.audio_music,
        avatar_type = record.avatar_type,
        avatar_name = or_placeholder(&record.avatar_name),
        extras = extras_section(record),
        hook = record.script.hook,
        cta = record.script.cta,
    )
}

/// Percent-encode `text` the way `encodeURIComponent` does.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

pub fn share_url(base_url: &str, payload: &str) -> String {
    format!("{base_url}{}", encode_component(payload))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
