//! Interactive wizard over a line-oriented terminal.
//!
//! Every step is a screen listing its fields. Input is one command per
//! line; see [`HELP`]. End of input leaves the wizard like `quit`.

use super::{load_config, open_store, LinkShare};
use anyhow::Context;
use briefing_core::{
    dashboard::Dashboard,
    media, options,
    record::{format_duration, BriefingRecord, CharacterDraft},
    share::ShareTarget,
    step::{Step, TOTAL_STEPS},
    store::BriefingStore,
    types::AvatarType,
    wizard::{Finished, Navigation, Wizard},
};
use std::io::{BufRead, Write};
use std::path::Path;

const HELP: &str = "\
commands:
  key=value            set a field of this step
  avatar-upload <path> use an image file as the main avatar (avatar step)
  add-cast n|t|d|img   add an extra character; image path or URL optional (avatar step)
  remove-cast <id>     remove an extra character (avatar step)
  tag <label>          toggle a negative prompt tag (negative prompt step)
  next                 save and go to the next step
  back                 previous step (leaves the wizard on step 1)
  goto <n>             revisit step n (review step)
  finish               share and save (review step)
  show                 redraw this screen
  quit                 leave without saving";

/// How an interactive session ended.
#[derive(Debug)]
pub enum Outcome {
    Finished(Finished),
    /// Backed out of step 1.
    Exited,
    /// `quit` or end of input.
    Quit,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn new(root: &Path, open: bool) -> anyhow::Result<()> {
    run_interactive(root, None, open)
}

pub fn edit(root: &Path, id: &str, open: bool) -> anyhow::Result<()> {
    run_interactive(root, Some(id), open)
}

fn run_interactive(root: &Path, id: Option<&str>, open: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let dashboard = Dashboard::new(open_store(root, &config)?);
    let record = match id {
        Some(id) => dashboard
            .open(id)
            .with_context(|| format!("project '{id}' not found"))?,
        None => dashboard.new_project(),
    };

    let mut share = LinkShare::new(&config, open || config.share.open_browser);
    let mut wizard = Wizard::new(dashboard.into_store(), record);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run_session(
        &mut wizard,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut share,
    )?;

    match outcome {
        Outcome::Finished(done) => {
            if let Some(url) = &share.last_url {
                println!("Share link: {url}");
            }
            match done.record.id() {
                Some(id) if done.saved => println!("Saved project '{id}'."),
                _ => println!("Could not save the project; the briefing above was not stored."),
            }
        }
        Outcome::Exited => println!("Back to the dashboard."),
        Outcome::Quit => println!("Left the wizard."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

pub fn run_session<S, R, W>(
    wizard: &mut Wizard<S>,
    input: &mut R,
    out: &mut W,
    share: &mut dyn ShareTarget,
) -> anyhow::Result<Outcome>
where
    S: BriefingStore,
    R: BufRead,
    W: Write,
{
    render(wizard, out)?;
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(Outcome::Quit);
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) if !c.contains('=') => (c, a.trim()),
            _ => (line, ""),
        };

        match command {
            "next" => {
                if wizard.step().is_last() {
                    writeln!(out, "This is the last step; use 'finish' or 'goto <n>'.")?;
                    continue;
                }
                wizard.advance();
                render(wizard, out)?;
            }
            "back" => match wizard.retreat() {
                Navigation::Moved(_) => render(wizard, out)?,
                Navigation::Exit => return Ok(Outcome::Exited),
            },
            "goto" => {
                let target = arg
                    .parse::<u8>()
                    .map_err(anyhow::Error::from)
                    .and_then(|n| Ok(Step::from_number(n)?));
                match target.and_then(|s| Ok(wizard.jump_to(s)?)) {
                    Ok(_) => render(wizard, out)?,
                    Err(e) => writeln!(out, "! {e}")?,
                }
            }
            "finish" => match wizard.finish(share) {
                Ok(done) => {
                    write!(out, "{}", done.payload)?;
                    if !done.shared {
                        writeln!(out, "! could not hand the briefing to the share target")?;
                    }
                    return Ok(Outcome::Finished(done));
                }
                Err(e) => writeln!(out, "! {e}")?,
            },
            "avatar-upload" => {
                if wizard.step() != Step::Avatar {
                    writeln!(out, "! the avatar is chosen on the avatar step")?;
                    continue;
                }
                match media::image_data_url(Path::new(arg)) {
                    Ok(image) => {
                        wizard.upload_avatar(image);
                        render(wizard, out)?;
                    }
                    Err(e) => writeln!(out, "! could not read '{arg}': {e}")?,
                }
            }
            "add-cast" => {
                if wizard.step() != Step::Avatar {
                    writeln!(out, "! extra characters are edited on the avatar step")?;
                    continue;
                }
                let mut draft = CharacterDraft::parse(arg);
                if let Some(image) = draft.image.take() {
                    match media::image_reference(&image) {
                        Ok(image) => draft.image = Some(image),
                        Err(e) => {
                            writeln!(out, "! could not read '{image}': {e}")?;
                            continue;
                        }
                    }
                }
                match wizard.add_extra_character(draft) {
                    Ok(id) => writeln!(out, "added character {id}")?,
                    Err(e) => writeln!(out, "! {e}")?,
                }
            }
            "remove-cast" => {
                if wizard.step() != Step::Avatar {
                    writeln!(out, "! extra characters are edited on the avatar step")?;
                    continue;
                }
                wizard.remove_extra_character(arg);
                render(wizard, out)?;
            }
            "tag" => {
                if wizard.step() != Step::NegativePrompt {
                    writeln!(out, "! tags are edited on the negative prompt step")?;
                    continue;
                }
                wizard.toggle_negative_tag(arg);
                writeln!(out, "negativePrompt = {}", wizard.record().negative_prompt)?;
            }
            "show" => render(wizard, out)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" => return Ok(Outcome::Quit),
            _ => match line.split_once('=') {
                Some((key, value)) => match wizard.set_field(key.trim(), value.trim()) {
                    Ok(()) => writeln!(out, "{} = {}", key.trim(), value.trim())?,
                    Err(e) => writeln!(out, "! {e}")?,
                },
                None => writeln!(out, "! unknown command '{command}' (try 'help')")?,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

fn render<S: BriefingStore, W: Write>(wizard: &Wizard<S>, out: &mut W) -> anyhow::Result<()> {
    let step = wizard.step();
    let record = wizard.record();
    writeln!(out)?;
    writeln!(
        out,
        "== Passo {}/{TOTAL_STEPS}: {} ==",
        step.number(),
        step.title()
    )?;

    if step.is_last() {
        return render_review(record, out);
    }

    for field in step.fields() {
        writeln!(out, "  {field:<20} {}", shown_value(record, field))?;
    }
    for (field, choices) in options::fields_with_choices(step) {
        writeln!(out, "  {field} choices:")?;
        for c in choices {
            writeln!(out, "    - {}: {}", c.id, c.description)?;
        }
    }

    match step {
        Step::ProjectDetails => {
            writeln!(out, "  duration: {}", format_duration(record.duration))?;
        }
        Step::Avatar => {
            let kinds: Vec<&str> = AvatarType::all().iter().map(|a| a.as_str()).collect();
            writeln!(out, "  avatarType choices: {}", kinds.join(", "))?;
            writeln!(
                out,
                "  extra characters ({}):",
                options::CHARACTER_TYPES.join(", ")
            )?;
            if record.extra_characters.is_empty() {
                writeln!(out, "    none")?;
            }
            for c in &record.extra_characters {
                write!(out, "    {}  {} ({}): {}", c.id, c.name, c.kind, c.description)?;
                match &c.image {
                    Some(image) => writeln!(out, " {}", media::describe(image))?,
                    None => writeln!(out)?,
                }
            }
        }
        Step::Script => {
            for &phase in briefing_core::types::ScriptPhase::all() {
                writeln!(
                    out,
                    "  [{}] {}: {}",
                    phase.window(),
                    phase.title(),
                    phase.hint()
                )?;
            }
        }
        Step::NegativePrompt => {
            writeln!(out, "  tags: {}", options::NEGATIVE_TAGS.join(", "))?;
        }
        _ => {}
    }
    Ok(())
}

fn render_review<W: Write>(record: &BriefingRecord, out: &mut W) -> anyhow::Result<()> {
    for &step in Step::all().iter().filter(|s| !s.is_last()) {
        writeln!(out, "  {}. {}", step.number(), step.title())?;
        for field in step.fields() {
            writeln!(out, "       {field:<20} {}", shown_value(record, field))?;
        }
        if step == Step::Avatar {
            for c in &record.extra_characters {
                writeln!(out, "       + {} ({}): {}", c.name, c.kind, c.description)?;
            }
        }
    }
    writeln!(out, "  'goto <n>' to edit a step, 'finish' to share and save.")?;
    Ok(())
}

/// Field value for a screen; inline pictures are summarised.
fn shown_value(record: &BriefingRecord, field: &str) -> String {
    let value = record.field_value(field).unwrap_or_default();
    if media::is_inline(&value) {
        media::describe(&value)
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_core::storage::MemoryStorage;
    use briefing_core::store::RecordStore;
    use std::io::Cursor;

    struct Recorder(Vec<String>);

    impl ShareTarget for Recorder {
        fn share(&mut self, payload: &str) -> briefing_core::Result<()> {
            self.0.push(payload.to_string());
            Ok(())
        }
    }

    fn session(
        script: &str,
    ) -> (
        Outcome,
        String,
        RecordStore<MemoryStorage>,
        Vec<String>,
    ) {
        let mut store = RecordStore::new(MemoryStorage::new());
        let mut share = Recorder(Vec::new());
        let mut out = Vec::new();
        let outcome = {
            let mut wizard = Wizard::new(&mut store, BriefingRecord::template());
            run_session(
                &mut wizard,
                &mut Cursor::new(script.as_bytes()),
                &mut out,
                &mut share,
            )
            .unwrap()
        };
        (
            outcome,
            String::from_utf8(out).unwrap(),
            store,
            share.0,
        )
    }

    #[test]
    fn full_walkthrough_finishes_and_saves_once() {
        let script = "projectName=Launch\nnext\nnext\nhook=Pare!\nnext\nvisualStyle=Futurista\nnext\nnext\nnext\nnext\nfinish\n";
        let (outcome, out, store, shared) = session(script);

        let Outcome::Finished(done) = outcome else {
            panic!("expected finish\n{out}");
        };
        assert!(done.saved);
        assert!(done.payload.contains("Launch"));
        assert_eq!(shared.len(), 1);

        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_name, "Launch");
        assert_eq!(listed[0].script.hook, "Pare!");
        assert_eq!(listed[0].visual_style, "Futurista");
        assert!(out.contains("== Passo 8/8: Revisão Final =="));
        assert!(out.contains("    - Futurista: Tech, neons e glow"));
    }

    #[test]
    fn back_on_first_step_exits_without_saving() {
        let (outcome, _, store, _) = session("projectName=X\nback\n");
        assert!(matches!(outcome, Outcome::Exited));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn end_of_input_quits() {
        let (outcome, _, store, _) = session("next\n");
        assert!(matches!(outcome, Outcome::Quit));
        // the one forward move was saved
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn foreign_fields_are_reported_inline() {
        let (_, out, _, _) = session("hook=Oi\nduration=soon\nquit\n");
        assert!(out.contains("! field 'hook' does not belong to step 'project_details'"));
        assert!(out.contains("! invalid value for 'duration': soon"));
    }

    #[test]
    fn goto_and_finish_are_review_only() {
        let (_, out, _, _) = session("goto 3\nfinish\nquit\n");
        assert!(out.contains("only the review step can jump"));
        assert!(out.contains("finish is only available on the review step"));
    }

    #[test]
    fn review_can_jump_back_and_return() {
        let script = "next\nnext\nnext\nnext\nnext\nnext\nnext\ngoto 1\nprojectName=Fixed\nnext\nnext\nnext\nnext\nnext\nnext\nnext\nfinish\n";
        let (outcome, _, store, _) = session(script);
        assert!(matches!(outcome, Outcome::Finished(_)));
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_name, "Fixed");
    }

    #[test]
    fn cast_commands_on_avatar_step() {
        let script = "add-cast Ana|Humano|apresentadora\nnext\nadd-cast Ana|Humano|apresentadora\nadd-cast  \nnext\nquit\n";
        let (_, out, store, _) = session(script);
        assert!(out.contains("! extra characters are edited on the avatar step"));
        assert!(out.contains("! character name is required"));
        let listed = store.list_all();
        assert_eq!(listed[0].extra_characters.len(), 1);
        assert_eq!(listed[0].extra_characters[0].name, "Ana");
    }

    #[test]
    fn uploads_become_inline_pictures() {
        let dir = tempfile::TempDir::new().unwrap();
        let photo = dir.path().join("eu.png");
        std::fs::write(&photo, b"hi").unwrap();
        let script = format!(
            "next\navatarType=clone\navatar-upload {p}\nadd-cast Ana|Humano|guia|{p}\nadd-cast Rex|Mascote||https://example.com/rex.png\nnext\nquit\n",
            p = photo.display()
        );
        let (_, out, store, _) = session(&script);
        assert!(out.contains("[image/png, 4 base64 chars]"));

        let saved = &store.list_all()[0];
        assert_eq!(saved.avatar_type, AvatarType::Upload);
        assert_eq!(saved.avatar_url, "");
        assert_eq!(
            saved.uploaded_avatar_image.as_deref(),
            Some("data:image/png;base64,aGk=")
        );
        assert_eq!(
            saved.extra_characters[0].image.as_deref(),
            Some("data:image/png;base64,aGk=")
        );
        assert_eq!(
            saved.extra_characters[1].image.as_deref(),
            Some("https://example.com/rex.png")
        );
    }

    #[test]
    fn unreadable_upload_is_reported_inline() {
        let script = "next\n\
            avatar-upload /nonexistent/eu.png\n\
            add-cast Ana|Humano|guia|notes.txt\n\
            next\nquit\n";
        let (_, out, store, _) = session(script);
        assert!(out.contains("! could not read '/nonexistent/eu.png'"));
        assert!(out.contains("! could not read 'notes.txt'"));
        let saved = &store.list_all()[0];
        assert_eq!(saved.avatar_type, AvatarType::Human);
        assert!(saved.extra_characters.is_empty());
    }

    #[test]
    fn avatar_choice_sets_preset_picture() {
        let (_, _, store, _) = session("next\navatarType=mascot\nnext\nquit\n");
        let saved = &store.list_all()[0];
        assert_eq!(
            Some(saved.avatar_url.as_str()),
            AvatarType::Mascot.preset_image()
        );
    }

    #[test]
    fn tag_toggles_on_negative_prompt_step() {
        let mut script = "next\n".repeat(6);
        script.push_str("tag Pessoas\ntag Desfocado\nnext\nquit\n");
        let (_, out, store, _) = session(&script);
        assert!(out.contains("negativePrompt = Desfocado"));
        assert_eq!(store.list_all()[0].negative_prompt, "Desfocado");
    }

    #[test]
    fn unknown_command_is_reported() {
        let (_, out, _, _) = session("dance\nquit\n");
        assert!(out.contains("! unknown command 'dance'"));
    }
}
