// src/models/portfolio.rs
use serde::Serialize;

/// A submitted portfolio after validation and sanitization.
///
/// Every free-text field in here is already HTML-entity-escaped by the
/// validation surface, so the renderer interpolates these values verbatim.
/// The `raw_*` fields are the trimmed but unescaped originals; host-facing
/// metadata (repository slug, description, manifest name) is derived from
/// those, so a name like `O'Brien` does not end up as `o-039-brien`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioData {
    pub display_name: String,
    pub bio: String,
    pub raw_display_name: String,
    pub raw_bio: String,
    pub location: Option<String>,
    pub social_links: SocialLinks,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub repository_url: Option<String>,
    pub live_url: Option<String>,
}

/// One work-history entry. All fields are free text and individually
/// optional; an entry with nothing filled in is dropped during sanitization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Experience {
    pub company: String,
    pub location: String,
    pub period: String,
    pub description: String,
}

impl Experience {
    pub fn is_blank(&self) -> bool {
        self.company.trim().is_empty()
            && self.location.trim().is_empty()
            && self.period.trim().is_empty()
            && self.description.trim().is_empty()
    }
}

/// Theme selection for the generated site. Unrecognized or missing values
/// fall back to the defaults (dark background, purple accent, light text)
/// instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    pub background: Background,
    pub primary: PrimaryColor,
    pub text: TextTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
    Purple,
    Blue,
}

impl Background {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Background::Dark,
            "light" => Background::Light,
            "purple" => Background::Purple,
            "blue" => Background::Blue,
            _ => Background::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryColor {
    #[default]
    Purple,
    Blue,
    Green,
    Red,
}

impl PrimaryColor {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "purple" => PrimaryColor::Purple,
            "blue" => PrimaryColor::Blue,
            "green" => PrimaryColor::Green,
            "red" => PrimaryColor::Red,
            _ => PrimaryColor::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTone {
    #[default]
    Light,
    Dark,
}

impl TextTone {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => TextTone::Light,
            "dark" => TextTone::Dark,
            _ => TextTone::default(),
        }
    }
}

/// The public summary returned to the client once provisioning succeeds.
/// The repository is created once and never touched again by this service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedRepository {
    pub html_url: String,
    pub owner_login: String,
    pub repo_name: String,
}

/// Lower-case a display name into a hosting-safe slug: whitespace runs
/// become single hyphens, anything outside `[a-z0-9-]` is dropped, hyphen
/// runs collapse, and a name with nothing usable left degrades to
/// "portfolio".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true; // suppress leading hyphens
    for ch in name.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            slug.push(lower);
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("portfolio");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
        assert_eq!(slugify("  Ada   Lovelace  "), "ada-lovelace");
        assert_eq!(slugify("ada"), "ada");
    }

    #[test]
    fn slugify_strips_unsafe_characters() {
        assert_eq!(slugify("Grace (Hopper)"), "grace-hopper");
        assert_eq!(slugify("C++ / Rust Dev"), "c-rust-dev");
        assert_eq!(slugify("名前"), "portfolio");
        assert_eq!(slugify(""), "portfolio");
        assert_eq!(slugify("---"), "portfolio");
    }

    #[test]
    fn theme_names_parse_case_insensitively() {
        assert_eq!(Background::from_name("Light"), Background::Light);
        assert_eq!(Background::from_name(" BLUE "), Background::Blue);
        assert_eq!(PrimaryColor::from_name("green"), PrimaryColor::Green);
        assert_eq!(TextTone::from_name("dark"), TextTone::Dark);
    }

    #[test]
    fn unknown_theme_names_fall_back_to_defaults() {
        assert_eq!(Background::from_name("neon"), Background::Dark);
        assert_eq!(Background::from_name(""), Background::Dark);
        assert_eq!(PrimaryColor::from_name("magenta"), PrimaryColor::Purple);
        assert_eq!(TextTone::from_name("sepia"), TextTone::Light);
        assert_eq!(Theme::default().background, Background::Dark);
    }

    #[test]
    fn blank_experience_entries_are_detected() {
        assert!(Experience::default().is_blank());
        let entry = Experience {
            company: "Initech".to_string(),
            ..Experience::default()
        };
        assert!(!entry.is_blank());
    }
}
