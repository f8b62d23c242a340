//! The defaults table and enum normalization applied at finalize.
//!
//! This is the single authoritative definition of the defaulting policy;
//! no other call site substitutes defaults.

/// Farm elements used when the user picked none.
pub const DEFAULT_FARM_ELEMENTS: &[&str] = &[
    "red barn",
    "hay bales",
    "chicken coop",
    "pumpkin patch",
];

/// Mood used when the user picked none.
pub const DEFAULT_MOOD: &str = "lighthearted";

/// Style-to-description table for backfilling `art_style.description`.
const ART_STYLE_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "whimsical",
        "playful watercolor scenes with soft edges and warm light",
    ),
    (
        "storybook",
        "classic storybook illustration with gentle outlines and flat color",
    ),
    (
        "watercolor",
        "loose watercolor washes with visible brushwork",
    ),
    (
        "cartoon",
        "bold cartoon shapes with expressive faces and bright color",
    ),
    (
        "vintage",
        "mid-century picture-book style with textured print grain",
    ),
    (
        "sketchbook",
        "pencil sketch lines with light ink and paper texture",
    ),
];

/// Look up the canned description for a style name.
///
/// Unknown styles fall back to a generic description built from the style
/// name, so finalize always produces a non-empty description.
pub fn art_style_description(style: &str) -> String {
    let needle = style.trim().to_ascii_lowercase();
    ART_STYLE_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, description)| (*description).to_string())
        .unwrap_or_else(|| format!("children's book illustrations in a {} style", style.trim()))
}

/// The one explicit antagonist-kind rewrite.
///
/// The upstream catalogue renamed the plain "squirrel" antagonist to
/// "squirrel-gang"; stored drafts and older clients still send the old
/// value. This is the only coercion — unknown kinds pass through untouched.
pub fn normalize_antagonist_kind(kind: &str) -> String {
    let trimmed = kind.trim();
    if trimmed.eq_ignore_ascii_case("squirrel") {
        "squirrel-gang".to_string()
    } else {
        trimmed.to_string()
    }
}
