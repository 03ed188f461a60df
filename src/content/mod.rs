//! Portfolio content: the read-only tree every section renders from.
//!
//! Loaded once at startup from `<data_dir>/content/*.json` and shared by
//! reference afterwards; nothing mutates it.

mod loader;

pub use loader::{load_all, CONTENT_DIR, CONTENT_FILES};

use serde::{Deserialize, Serialize};

/// Site metadata from `meta.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub version: String,
    pub name: String,
    pub title: String,
    pub one_liner: String,
    pub site_url: String,
    pub ssh_address: String,
    pub source_repo: String,
}

/// An education entry, shared by `about.json` and `cv.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

/// Bio and personal details from `about.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub bio: String,
    pub location: String,
    pub status: String,
    pub email: String,
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub url: String,
    pub repo: String,
    pub featured: bool,
}

impl Project {
    /// The address copied on activation: the site if there is one, else
    /// the repository.
    pub fn link(&self) -> Option<&str> {
        [self.url.as_str(), self.repo.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    pub projects: Vec<Project>,
}

impl Work {
    /// Featured projects first; input order is kept within each group.
    pub fn sorted_projects(&self) -> Vec<&Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by_key(|p| !p.featured);
        sorted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub location: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
}

impl Experience {
    /// `start - end`, or just `start` for an open-ended role.
    pub fn date_range(&self) -> String {
        if self.end.is_empty() {
            self.start.clone()
        } else {
            format!("{} - {}", self.start, self.end)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub category: String,
    pub items: Vec<String>,
}

/// The résumé from `cv.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cv {
    pub contact: Contact,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
    pub icon: String,
    /// Display text; the URL is shown when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Link {
    pub fn display(&self) -> &str {
        if self.text.is_empty() {
            &self.url
        } else {
            &self.text
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub links: Vec<Link>,
}

/// Everything the TUI shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub meta: Meta,
    pub about: About,
    pub work: Work,
    pub cv: Cv,
    pub links: Links,
}

impl Content {
    /// The bundled sample content, for tests.
    #[cfg(test)]
    pub(crate) fn fixture() -> Content {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        match load_all(&dir) {
            Ok(content) => content,
            Err(e) => panic!("sample content failed to load: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project(title: &str, featured: bool) -> Project {
        Project {
            title: title.to_string(),
            featured,
            ..Project::default()
        }
    }

    #[test]
    fn featured_first_is_stable() {
        let work = Work {
            projects: vec![
                project("a", false),
                project("b", true),
                project("c", false),
                project("d", true),
            ],
        };
        let order: Vec<&str> = work.sorted_projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn project_link_prefers_url() {
        let mut p = project("x", false);
        assert_eq!(p.link(), None);
        p.repo = "https://github.com/x/x".into();
        assert_eq!(p.link(), Some("https://github.com/x/x"));
        p.url = "https://x.dev".into();
        assert_eq!(p.link(), Some("https://x.dev"));
    }

    #[test]
    fn meta_uses_camel_case_keys() {
        let meta: Meta = serde_json::from_str(
            r#"{"version":"1","name":"N","title":"T","oneLiner":"hi","siteUrl":"https://n.dev"}"#,
        )
        .unwrap();
        assert_eq!(meta.one_liner, "hi");
        assert_eq!(meta.site_url, "https://n.dev");
        assert_eq!(meta.ssh_address, "");
    }

    #[test]
    fn link_display_falls_back_to_url() {
        let mut link = Link {
            label: "GitHub".into(),
            url: "https://github.com/n".into(),
            ..Link::default()
        };
        assert_eq!(link.display(), "https://github.com/n");
        link.text = "github.com/n".into();
        assert_eq!(link.display(), "github.com/n");
    }

    #[test]
    fn date_range() {
        let mut exp = Experience {
            start: "2021".into(),
            ..Experience::default()
        };
        assert_eq!(exp.date_range(), "2021");
        exp.end = "Present".into();
        assert_eq!(exp.date_range(), "2021 - Present");
    }

    #[test]
    fn fixture_loads() {
        let content = Content::fixture();
        assert!(!content.meta.name.is_empty());
        assert!(content.work.projects.iter().any(|p| p.featured));
        assert!(!content.links.links.is_empty());
    }
}
