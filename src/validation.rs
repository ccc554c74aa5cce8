// src/validation.rs - validation and sanitization of submitted portfolios
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dtos::portfolio::{ExperienceIn, PortfolioIn, ProjectIn};
use crate::models::portfolio::{
    Background, Experience, PortfolioData, PrimaryColor, Project, SocialLinks, TextTone, Theme,
};

/// Field name -> human readable message, ordered for stable responses.
pub type FieldErrors = BTreeMap<String, String>;

static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| {
    // scheme "://" followed by at least one non-whitespace character
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").expect("url pattern must compile")
});

/// Empty strings are fine (the field is optional); anything else must look
/// like an absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    url.is_empty() || ABSOLUTE_URL.is_match(url)
}

/// HTML-entity-escape user text. Ampersand first, so the other replacements
/// do not get double-escaped. Deliberately not idempotent: running it twice
/// double-escapes, so the handler applies it exactly once.
pub fn sanitize_input(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Check required fields and URL shape on the raw submission. Returns every
/// problem at once, keyed by field, so the client can annotate the form.
pub fn validate_portfolio(input: &PortfolioIn) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if input.display_name.trim().is_empty() {
        errors.insert("displayName".into(), "Name is required".into());
    }
    if input.bio.trim().is_empty() {
        errors.insert("bio".into(), "Bio is required".into());
    }

    let links = &input.social_links;
    check_url(&mut errors, "socialLinks.github", &links.github);
    check_url(&mut errors, "socialLinks.linkedin", &links.linkedin);
    check_url(&mut errors, "socialLinks.twitter", &links.twitter);
    check_url(&mut errors, "socialLinks.website", &links.website);

    if input.projects.is_empty() {
        errors.insert("projects".into(), "At least one project is required".into());
    }
    for (index, project) in input.projects.iter().enumerate() {
        validate_project(&mut errors, index, project);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_project(errors: &mut FieldErrors, index: usize, project: &ProjectIn) {
    if project.name.trim().is_empty() {
        errors.insert(
            format!("projects[{index}].name"),
            "Project name is required".into(),
        );
    }
    if project.description.trim().is_empty() {
        errors.insert(
            format!("projects[{index}].description"),
            "Project description is required".into(),
        );
    }
    if !project.technologies.iter().any(|t| !t.trim().is_empty()) {
        errors.insert(
            format!("projects[{index}].technologies"),
            "At least one technology is required".into(),
        );
    }
    check_url(
        errors,
        &format!("projects[{index}].repositoryUrl"),
        &project.repository_url,
    );
    check_url(
        errors,
        &format!("projects[{index}].liveUrl"),
        &project.live_url,
    );
}

fn check_url(errors: &mut FieldErrors, field: &str, value: &Option<String>) {
    if let Some(url) = value {
        if !is_valid_url(url) {
            errors.insert(field.to_string(), "Please enter a valid URL".into());
        }
    }
}

/// Turn a validated submission into the sanitized domain model: trim, escape
/// every free-text field once, fold empty optionals to `None`, drop blank
/// experience rows and empty technology entries, and resolve the theme.
pub fn sanitize_portfolio(input: PortfolioIn) -> PortfolioData {
    let theme = input
        .theme
        .map(|t| Theme {
            background: Background::from_name(t.background.as_deref().unwrap_or_default()),
            primary: PrimaryColor::from_name(t.primary.as_deref().unwrap_or_default()),
            text: TextTone::from_name(t.text.as_deref().unwrap_or_default()),
        })
        .unwrap_or_default();

    let projects = input
        .projects
        .into_iter()
        .map(|p| Project {
            name: clean(&p.name),
            description: clean(&p.description),
            technologies: p
                .technologies
                .iter()
                .map(|t| clean(t))
                .filter(|t| !t.is_empty())
                .collect(),
            repository_url: clean_opt(p.repository_url),
            live_url: clean_opt(p.live_url),
        })
        .collect();

    let experience = input
        .experience
        .into_iter()
        .map(|e: ExperienceIn| Experience {
            company: clean(&e.company),
            location: clean(&e.location),
            period: clean(&e.period),
            description: clean(&e.description),
        })
        .filter(|e| !e.is_blank())
        .collect();

    let links = input.social_links;
    PortfolioData {
        display_name: clean(&input.display_name),
        bio: clean(&input.bio),
        raw_display_name: input.display_name.trim().to_string(),
        raw_bio: input.bio.trim().to_string(),
        location: clean_opt(input.location),
        social_links: SocialLinks {
            github: clean_opt(links.github),
            linkedin: clean_opt(links.linkedin),
            twitter: clean_opt(links.twitter),
            website: clean_opt(links.website),
        },
        projects,
        experience,
        theme,
    }
}

fn clean(value: &str) -> String {
    sanitize_input(value.trim())
}

fn clean_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| clean(&v))
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::portfolio::{SocialLinksIn, ThemeIn};

    fn minimal_input() -> PortfolioIn {
        PortfolioIn {
            display_name: "Ada Lovelace".into(),
            bio: "Engineer".into(),
            location: None,
            social_links: SocialLinksIn::default(),
            projects: vec![ProjectIn {
                name: "X".into(),
                description: "Y".into(),
                technologies: vec!["TS".into()],
                repository_url: None,
                live_url: None,
            }],
            experience: vec![],
            theme: None,
        }
    }

    #[test]
    fn empty_url_is_allowed() {
        assert!(is_valid_url(""));
    }

    #[test]
    fn absolute_urls_pass() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/a/b?c=d"));
        assert!(is_valid_url("ftp://files.example.com"));
    }

    #[test]
    fn relative_or_garbage_urls_fail() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("https://bad url.com"));
    }

    #[test]
    fn sanitize_escapes_html_entities() {
        assert_eq!(sanitize_input("<script>"), "&lt;script&gt;");
        assert_eq!(sanitize_input("a & b"), "a &amp; b");
        assert_eq!(sanitize_input("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(sanitize_input("it's"), "it&#039;s");
    }

    #[test]
    fn sanitize_is_not_idempotent() {
        // double application double-escapes, which is why the handler runs
        // it exactly once
        let once = sanitize_input("<b>");
        let twice = sanitize_input(&once);
        assert_eq!(once, "&lt;b&gt;");
        assert_eq!(twice, "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn minimal_submission_validates() {
        assert!(validate_portfolio(&minimal_input()).is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let mut input = minimal_input();
        input.display_name = "   ".into();
        input.bio = String::new();
        input.projects.clear();

        let errors = validate_portfolio(&input).unwrap_err();
        assert!(errors.contains_key("displayName"));
        assert!(errors.contains_key("bio"));
        assert!(errors.contains_key("projects"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn invalid_urls_are_reported_with_their_field_path() {
        let mut input = minimal_input();
        input.social_links.website = Some("not a url".into());
        input.projects[0].repository_url = Some("nope".into());
        input.projects[0].live_url = Some("https://demo.example.com".into());

        let errors = validate_portfolio(&input).unwrap_err();
        assert!(errors.contains_key("socialLinks.website"));
        assert!(errors.contains_key("projects[0].repositoryUrl"));
        assert!(!errors.contains_key("projects[0].liveUrl"));
    }

    #[test]
    fn project_without_usable_technologies_is_rejected() {
        let mut input = minimal_input();
        input.projects[0].technologies = vec!["  ".into(), String::new()];
        let errors = validate_portfolio(&input).unwrap_err();
        assert!(errors.contains_key("projects[0].technologies"));
    }

    #[test]
    fn sanitize_portfolio_escapes_and_trims() {
        let mut input = minimal_input();
        input.display_name = "  Ada <Lovelace>  ".into();
        input.projects[0].description = "math & machines".into();
        input.projects[0].technologies = vec![" TS ".into(), "  ".into()];

        let data = sanitize_portfolio(input);
        assert_eq!(data.display_name, "Ada &lt;Lovelace&gt;");
        assert_eq!(data.projects[0].description, "math &amp; machines");
        assert_eq!(data.projects[0].technologies, vec!["TS".to_string()]);
    }

    #[test]
    fn raw_copies_are_trimmed_but_not_escaped() {
        let mut input = minimal_input();
        input.display_name = "  O'Brien & Co  ".into();
        input.bio = " Engineer & writer ".into();

        let data = sanitize_portfolio(input);
        assert_eq!(data.display_name, "O&#039;Brien &amp; Co");
        assert_eq!(data.raw_display_name, "O'Brien & Co");
        assert_eq!(data.raw_bio, "Engineer & writer");
    }

    #[test]
    fn sanitize_portfolio_folds_empty_optionals() {
        let mut input = minimal_input();
        input.location = Some("   ".into());
        input.social_links.github = Some(String::new());
        input.social_links.website = Some("https://ada.dev".into());
        input.experience = vec![ExperienceIn::default()];

        let data = sanitize_portfolio(input);
        assert_eq!(data.location, None);
        assert_eq!(data.social_links.github, None);
        assert_eq!(data.social_links.website.as_deref(), Some("https://ada.dev"));
        assert!(data.experience.is_empty());
    }

    #[test]
    fn theme_strings_resolve_with_fallbacks() {
        let mut input = minimal_input();
        input.theme = Some(ThemeIn {
            background: Some("blue".into()),
            primary: Some("hotpink".into()),
            text: None,
        });

        let data = sanitize_portfolio(input);
        assert_eq!(data.theme.background, Background::Blue);
        assert_eq!(data.theme.primary, PrimaryColor::Purple);
        assert_eq!(data.theme.text, TextTone::Light);
    }
}
