//! Choice lists shown on the step screens. They are hints: the record
//! accepts any text for these fields.

use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub id: &'static str,
    pub description: &'static str,
}

const fn choice(id: &'static str, description: &'static str) -> Choice {
    Choice { id, description }
}

pub const VISUAL_STYLES: &[Choice] = &[
    choice("Cinemático", "Realismo e alta qualidade"),
    choice("Minimalista", "Clean, foco no produto"),
    choice("Futurista", "Tech, neons e glow"),
    choice("Ilustração", "Vetorial e artístico"),
    choice("Corporativo", "Sério e profissional"),
    choice("Pop Art", "Cores vibrantes e fortes"),
];

pub const LIGHTING: &[Choice] = &[
    choice("Natural", ""),
    choice("Estúdio", ""),
    choice("Dramática", ""),
    choice("Noturna", ""),
];

pub const CAMERA_MOVEMENTS: &[Choice] = &[
    choice("Estático", ""),
    choice("Suave", ""),
    choice("Dinâmico", ""),
    choice("Handheld", ""),
    choice("Órbita", ""),
    choice("Panorâmica", ""),
];

pub const TRANSITIONS: &[Choice] = &[
    choice("Corte Seco", ""),
    choice("Fade", ""),
    choice("Zoom", ""),
    choice("Criativo", ""),
];

pub const CAPTION_STYLES: &[Choice] = &[
    choice("Moderno", ""),
    choice("Normal", ""),
    choice("Sem Legenda", ""),
];

pub const MUSIC: &[Choice] = &[
    choice("pop", "Pop: energia positiva."),
    choice("corporate", "Corporativo: sério e focado."),
    choice("electronic", "Eletrônica: futurista."),
    choice("acoustic", "Acústico: orgânico e leve."),
    choice("lofi", "Lofi: relaxante."),
    choice("rock", "Rock: intenso."),
    choice("epic", "Épico: grandioso."),
    choice("jazz", "Jazz: sofisticado."),
];

pub const NEGATIVE_TAGS: &[&str] = &[
    "Texto excessivo",
    "Desfocado",
    "Pessoas",
    "Marca d'água",
    "Distorção",
    "Cores Neon",
];

pub const CHARACTER_TYPES: &[&str] = &["Humano", "Mascote", "Cliente", "Voz Off"];

/// Choices for a free-text field, if the screen offers any.
pub fn choices_for(field: &str) -> &'static [Choice] {
    match field {
        "visualStyle" => VISUAL_STYLES,
        "lighting" => LIGHTING,
        "cameraMovement" => CAMERA_MOVEMENTS,
        "transition" => TRANSITIONS,
        "captionStyle" => CAPTION_STYLES,
        "audioMusic" => MUSIC,
        _ => &[],
    }
}

/// Fields of `step` that come with a choice list.
pub fn fields_with_choices(step: Step) -> impl Iterator<Item = (&'static str, &'static [Choice])> {
    step.fields()
        .iter()
        .map(|f| (*f, choices_for(f)))
        .filter(|(_, c)| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BriefingRecord;

    #[test]
    fn template_values_are_listed_choices() {
        let r = BriefingRecord::template();
        for (field, value) in [
            ("visualStyle", &r.visual_style),
            ("lighting", &r.lighting),
            ("cameraMovement", &r.camera_movement),
            ("transition", &r.transition),
            ("captionStyle", &r.caption_style),
            ("audioMusic", &r.audio_music),
        ] {
            assert!(
                choices_for(field).iter().any(|c| c.id == value.as_str()),
                "{field}={value} not offered"
            );
        }
    }

    #[test]
    fn art_direction_offers_style_and_lighting() {
        let fields: Vec<&str> = fields_with_choices(Step::ArtDirection)
            .map(|(f, _)| f)
            .collect();
        assert_eq!(fields, ["visualStyle", "lighting"]);
        assert_eq!(fields_with_choices(Step::Review).count(), 0);
    }
}
