//! Prompt assembly.
//!
//! Every story request carries the same narrative-universe brief: one
//! persona, one farm, applied identically regardless of configuration. The
//! user-facing traits are woven into the request message.

use storybarn_core::DraftConfig;

/// The fixed narrative-universe brief sent as the system message of every
/// story request.
const NARRATIVE_BRIEF: &str = "\
You are the resident storyteller of Maplewood Farm, a sunny family farm \
where every story stars a small Yorkshire Terrier. Stories are for \
children aged three to seven: short chapters, warm humor, gentle stakes, \
and a kind resolution. Keep the farm itself consistent between stories: a \
red barn, a farmhouse with a wide porch, and fields that change with the \
seasons. Respond ONLY with valid JSON matching the requested shape, with \
no commentary before or after.";

/// The fixed brief sent as the system message of every image-analysis
/// request.
const ANALYSIS_BRIEF: &str = "\
You catalogue illustrations for a children's storybook about a Yorkshire \
Terrier on Maplewood Farm. Given an illustration, describe the scene and \
profile the pictured character. Respond ONLY with valid JSON of the shape \
{\"description\": string, \"characterProfile\": {\"name\": string, \
\"personality\": string, \"description\": string}} and no other text.";

/// The narrative-universe brief (system message for story generation).
pub fn narrative_brief() -> &'static str {
    NARRATIVE_BRIEF
}

/// The cataloguing brief (system message for image analysis).
pub fn analysis_brief() -> &'static str {
    ANALYSIS_BRIEF
}

/// Build the user message for a story request from a complete configuration.
pub fn story_prompt(config: &DraftConfig) -> String {
    let name = config
        .protagonist
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("an unnamed pup");

    format!(
        "Write a story about {name}, a Yorkshire Terrier with a {appearance} \
         coat who is {personality}. The antagonist is {antagonist_kind} \
         ({antagonist_personality}). Theme: {theme}. Mood: {mood}. The story \
         should feature these parts of the farm: {elements}. It will be \
         illustrated in a {style} style ({style_description}), so keep scenes \
         easy to picture.\n\n\
         Respond with JSON of the shape {{\"title\": string, \"content\": \
         string, \"metadata\": {{\"wordCount\": number, \"chapterCount\": \
         number, \"tone\": string, \"protagonist\": {{\"name\": string, \
         \"personality\": string, \"description\": string}}}}}}.",
        name = name,
        appearance = non_empty(&config.protagonist.appearance, "black and tan"),
        personality = config.protagonist.personality,
        antagonist_kind = config.antagonist.kind,
        antagonist_personality = non_empty(&config.antagonist.personality, "up to no good"),
        theme = config.theme,
        mood = config.mood,
        elements = config.farm_elements.join(", "),
        style = config.art_style.style,
        style_description = config.art_style.description,
    )
}

/// Build an illustration prompt from a complete configuration.
pub fn illustration_prompt(config: &DraftConfig) -> String {
    format!(
        "Children's storybook illustration of a Yorkshire Terrier with a {} \
         coat, {}, on a sunny family farm with {}. {} style: {}.",
        non_empty(&config.protagonist.appearance, "black and tan"),
        config.protagonist.personality,
        config.farm_elements.join(", "),
        config.art_style.style,
        config.art_style.description,
    )
}

/// Compose a direct illustration prompt with optional style and coat colors.
pub fn dalle_prompt(prompt: &str, art_style: Option<&str>, colors: &[String]) -> String {
    let mut composed = format!("Children's storybook illustration: {}", prompt.trim());

    if !colors.is_empty() {
        composed.push_str(&format!(
            ". The Yorkshire Terrier's coat is {}",
            colors.join(" and ")
        ));
    }

    if let Some(style) = art_style.map(str::trim).filter(|s| !s.is_empty()) {
        composed.push_str(&format!(". Render in a {} style", style));
    }

    composed
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
