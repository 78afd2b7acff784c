//! Human-readable output for scripts, sessions and styles.

use super::commands::OutputFormat;
use scenecraft::{GenerationError, JsonError, ScenecraftResult, Script, Session, VisualStyle};
use serde::Serialize;
use strum::IntoEnumIterator;

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ScenecraftResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(JsonError::from)?;
    println!("{}", json);
    Ok(())
}

/// Print a script section by section.
pub fn print_script(script: &Script) {
    println!("Characters:");
    for character in &script.characters {
        println!("  {}: {}", character.name, character.descriptor);
    }

    println!();
    println!("{:-<80}", "");
    for scene in &script.scenes {
        println!("{}", scene.label);
        println!("  Dialogue: {}", scene.dialogue);
        for (i, detail) in scene.details.iter().enumerate() {
            println!("  Beat {}: {}", i + 1, detail.story_beat);
            println!("    Image: {}", detail.image_prompt);
            println!("    Video: {}", detail.video_prompt);
        }
        println!("{:-<80}", "");
    }

    let seo = &script.seo;
    println!("Titles:");
    for title in &seo.titles {
        println!("  - {}", title);
    }
    println!("Description:\n  {}", seo.description);
    println!("Thumbnail prompts:");
    for prompt in &seo.thumbnail_prompts {
        println!("  - {}", prompt);
    }
    println!("Tags: {}", seo.tags.join(", "));
}

/// Print a session header followed by its script.
pub fn print_session(session: &Session, format: OutputFormat) -> ScenecraftResult<()> {
    if let OutputFormat::Json = format {
        return print_json(session);
    }

    println!("{} ({})", session.title(), session.id());
    println!("Created: {}", session.created_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "Style: {} | Length: {}",
        session.inputs().visual_style(),
        session.inputs().length()
    );
    match session.image() {
        Some(image) => println!("Image: {} ({} bytes)", image.mime_type(), image.len()),
        None => println!("Image: none"),
    }
    println!();
    match session.script() {
        Some(script) => print_script(script),
        None => println!("No script recorded."),
    }
    Ok(())
}

/// Report a failed generation stage on stderr.
pub fn print_failure(stage: &str, err: &GenerationError) {
    eprintln!("{} failed: {}", stage, err.message());
    if let Some(hint) = err.hint() {
        eprintln!("  hint: {}", hint);
    }
}

/// List the visual style catalogue.
pub fn list_styles() {
    println!("{:<22} Label", "Style");
    println!("{:-<60}", "");
    for style in VisualStyle::iter() {
        println!("{:<22} {}", style.slug(), style);
    }
}
