//! Public site routing table.
//!
//! The site is a fixed set of pages. `/case-studies` is kept as a legacy
//! alias for the projects page; anything unrecognised resolves to the
//! not-found page. Matching ignores the query string, the fragment, one
//! trailing slash and ASCII case.

use serde::Serialize;

/// Pages the site can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SitePage {
    /// Landing page.
    Home,
    /// Company background.
    About,
    /// Career timeline.
    CareerHighlights,
    /// Service catalogue.
    Services,
    /// Project portfolio.
    Projects,
    /// Enquiry form.
    Contact,
    /// Fallback for unknown paths.
    NotFound,
}

impl SitePage {
    /// Stable page name, matching the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::CareerHighlights => "career-highlights",
            Self::Services => "services",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::NotFound => "not-found",
        }
    }

    /// Canonical path for the page.
    pub fn canonical_path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::CareerHighlights => "/career-highlights",
            Self::Services => "/services",
            Self::Projects => "/projects",
            Self::Contact => "/contact",
            Self::NotFound => "/404",
        }
    }
}

const ROUTES: [(&str, SitePage); 9] = [
    ("/", SitePage::Home),
    ("/about", SitePage::About),
    ("/career-highlights", SitePage::CareerHighlights),
    ("/services", SitePage::Services),
    ("/projects", SitePage::Projects),
    ("/case-studies", SitePage::Projects),
    ("/contact", SitePage::Contact),
    ("/404", SitePage::NotFound),
    ("", SitePage::Home),
];

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoute {
    page: SitePage,
    legacy_alias: bool,
}

impl ResolvedRoute {
    /// Page to render.
    pub fn page(&self) -> SitePage {
        self.page
    }

    /// Canonical path of the rendered page.
    pub fn canonical_path(&self) -> &'static str {
        self.page.canonical_path()
    }

    /// Whether the request used a legacy path.
    pub fn legacy_alias(&self) -> bool {
        self.legacy_alias
    }

    /// Whether a real page matched.
    pub fn is_found(&self) -> bool {
        self.page != SitePage::NotFound
    }
}

/// Resolve a browser path to a page.
///
/// # Examples
/// ```
/// use site_backend::domain::site_route::{SitePage, resolve};
///
/// let route = resolve("/case-studies?tab=rail#top");
/// assert_eq!(route.page(), SitePage::Projects);
/// assert_eq!(route.canonical_path(), "/projects");
/// assert!(route.legacy_alias());
/// assert!(!resolve("/nope").is_found());
/// ```
pub fn resolve(raw_path: &str) -> ResolvedRoute {
    let path = normalise(raw_path);
    let page = ROUTES
        .iter()
        .find(|(pattern, _)| pattern.eq_ignore_ascii_case(path))
        .map_or(SitePage::NotFound, |(_, page)| *page);
    ResolvedRoute {
        page,
        legacy_alias: page != SitePage::NotFound
            && !page.canonical_path().eq_ignore_ascii_case(path)
            && !path.is_empty(),
    }
}

fn normalise(raw_path: &str) -> &str {
    let path = raw_path.split(['?', '#']).next().unwrap_or_default();
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}
