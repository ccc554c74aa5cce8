use std::collections::BTreeMap;

use askama::Template;

use crate::models::portfolio::{slugify, Experience, PortfolioData, Project, SocialLinks};

pub mod palette;

use palette::Palette;

/// Relative paths of the generated artifacts. The set is fixed; callers
/// iterate the returned map rather than hardcoding paths, except for the
/// README, which doubles as the host's auto-init seed file.
pub const README_PATH: &str = "README.md";
pub const INDEX_PATH: &str = "index.html";
pub const MANIFEST_PATH: &str = "package.json";

/// Renders the full artifact set for one portfolio: path -> file content.
///
/// Deterministic: no clock, no randomness, no I/O. Input strings arrive
/// already entity-escaped, so the templates interpolate them verbatim.
pub fn render_site(profile: &PortfolioData) -> Result<BTreeMap<String, String>, askama::Error> {
    let social = link_views(&profile.social_links);
    let projects: Vec<ProjectView> = profile.projects.iter().map(ProjectView::from_model).collect();
    let experience: Vec<ExperienceView> = profile
        .experience
        .iter()
        .map(ExperienceView::from_model)
        .collect();
    let location = profile.location.clone().unwrap_or_default();

    let readme = ReadmeTemplate {
        name: profile.display_name.clone(),
        bio: profile.bio.clone(),
        has_location: !location.is_empty(),
        location: location.clone(),
        has_social: !social.is_empty(),
        social: social.clone(),
        projects: projects.clone(),
        has_experience: !experience.is_empty(),
        experience: experience.clone(),
    }
    .render()?;

    let index = IndexTemplate {
        name: profile.display_name.clone(),
        bio: profile.bio.clone(),
        has_location: !location.is_empty(),
        location,
        has_social: !social.is_empty(),
        social,
        projects,
        has_experience: !experience.is_empty(),
        experience,
        palette: palette::resolve(&profile.theme),
    }
    .render()?;

    let mut files = BTreeMap::new();
    files.insert(README_PATH.to_string(), readme);
    files.insert(INDEX_PATH.to_string(), index);
    files.insert(MANIFEST_PATH.to_string(), package_manifest(&profile.raw_display_name));
    Ok(files)
}

#[derive(Template)]
#[template(path = "readme.md", escape = "none")]
struct ReadmeTemplate {
    name: String,
    bio: String,
    has_location: bool,
    location: String,
    has_social: bool,
    social: Vec<LinkView>,
    projects: Vec<ProjectView>,
    has_experience: bool,
    experience: Vec<ExperienceView>,
}

#[derive(Template)]
#[template(path = "index.html", escape = "none")]
struct IndexTemplate {
    name: String,
    bio: String,
    has_location: bool,
    location: String,
    has_social: bool,
    social: Vec<LinkView>,
    projects: Vec<ProjectView>,
    has_experience: bool,
    experience: Vec<ExperienceView>,
    palette: Palette,
}

#[derive(Debug, Clone)]
struct LinkView {
    label: &'static str,
    href: String,
}

#[derive(Debug, Clone)]
struct ProjectView {
    name: String,
    description: String,
    technologies: Vec<String>,
    tech_line: String,
    has_repository: bool,
    repository_url: String,
    has_live: bool,
    live_url: String,
}

impl ProjectView {
    fn from_model(project: &Project) -> Self {
        let tech_line = project
            .technologies
            .iter()
            .map(|tech| format!("`{tech}`"))
            .collect::<Vec<_>>()
            .join(", ");
        ProjectView {
            name: project.name.clone(),
            description: project.description.clone(),
            technologies: project.technologies.clone(),
            tech_line,
            has_repository: project.repository_url.is_some(),
            repository_url: project.repository_url.clone().unwrap_or_default(),
            has_live: project.live_url.is_some(),
            live_url: project.live_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
struct ExperienceView {
    heading: String,
    has_meta: bool,
    meta: String,
    has_description: bool,
    description: String,
}

impl ExperienceView {
    fn from_model(entry: &Experience) -> Self {
        let heading = if entry.company.is_empty() {
            "Experience".to_string()
        } else {
            entry.company.clone()
        };
        let meta = match (entry.period.is_empty(), entry.location.is_empty()) {
            (false, false) => format!("{} | {}", entry.period, entry.location),
            (false, true) => entry.period.clone(),
            (true, false) => entry.location.clone(),
            (true, true) => String::new(),
        };
        ExperienceView {
            heading,
            has_meta: !meta.is_empty(),
            meta,
            has_description: !entry.description.is_empty(),
            description: entry.description.clone(),
        }
    }
}

fn link_views(links: &SocialLinks) -> Vec<LinkView> {
    let mut views = Vec::new();
    if let Some(url) = &links.github {
        views.push(LinkView { label: "GitHub", href: url.clone() });
    }
    if let Some(url) = &links.linkedin {
        views.push(LinkView { label: "LinkedIn", href: url.clone() });
    }
    if let Some(url) = &links.twitter {
        views.push(LinkView { label: "Twitter", href: url.clone() });
    }
    if let Some(url) = &links.website {
        views.push(LinkView { label: "Website", href: url.clone() });
    }
    views
}

fn package_manifest(display_name: &str) -> String {
    let manifest = serde_json::json!({
        "name": format!("{}-portfolio", slugify(display_name)),
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "dev": "npx serve .",
            "start": "npx serve ."
        }
    });
    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}
