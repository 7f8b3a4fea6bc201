//! Interactive customisation of the server entry.

use crate::model::ServerEntry;
use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use mcpollinations::TOOL_NAMES;
use mcpollinations::audio::VOICES;
use mcpollinations_common::expand_home;

pub fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn text(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

fn number(theme: &ColorfulTheme, prompt: &str, default: u32) -> Result<u32> {
    Ok(Input::<u32>::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact_text()?)
}

/// Walk through every customisable setting, starting from `entry`.
pub fn customize(theme: &ColorfulTheme, mut entry: ServerEntry) -> Result<ServerEntry> {
    println!("\nResource directories:");
    println!("An absolute output path is recommended; some MCP clients change the working directory.");
    let output_dir = text(theme, "Output directory for saved files", &entry.resources.output_dir)?;
    println!("  -> {}", expand_home(&output_dir).display());
    entry.resources.output_dir = output_dir;

    println!("\nImage generation parameters:");
    if confirm(theme, "Customize image generation parameters?", false)? {
        println!("Available image models: \"flux\", \"turbo\" (use listImageModels to see all)");
        let image = &mut entry.default_params.image;
        image.model = text(theme, "Default image model", &image.model)?;
        image.width = number(theme, "Default image width", image.width)?;
        image.height = number(theme, "Default image height", image.height)?;
        image.safe = confirm(theme, "Enable safe mode for images?", image.safe)?;
        image.enhance = confirm(
            theme,
            "Enable prompt enhancement using LLM before image generation?",
            image.enhance,
        )?;
    }

    println!("\nText generation parameters:");
    if confirm(theme, "Customize text generation parameters?", false)? {
        println!("Use listTextModels to see all available models");
        let text_defaults = &mut entry.default_params.text;
        text_defaults.model = text(theme, "Default text model", &text_defaults.model)?;
    }

    println!("\nAudio generation parameters:");
    if confirm(theme, "Customize audio generation parameters?", false)? {
        println!("Available voices: {}", VOICES.join(", "));
        let audio = &mut entry.default_params.audio;
        audio.voice = text(theme, "Default voice", &audio.voice)?;
    }

    println!("\nTool restrictions:");
    entry.disabled = confirm(theme, "Disable the server by default?", false)?;

    if confirm(theme, "Customize allowed tools?", false)? {
        let checked: Vec<bool> = TOOL_NAMES
            .iter()
            .map(|tool| entry.always_allow.iter().any(|allowed| allowed == tool))
            .collect();
        let selected = MultiSelect::with_theme(theme)
            .with_prompt("Tools to allow without confirmation (space toggles, enter accepts)")
            .items(&TOOL_NAMES)
            .defaults(&checked)
            .interact()?;
        entry.always_allow = selected.into_iter().map(|i| TOOL_NAMES[i].to_string()).collect();
    }

    Ok(entry)
}

/// Ask for the output file path.
pub fn output_path(theme: &ColorfulTheme, default: &str) -> Result<String> {
    text(theme, "Output file path", default)
}
