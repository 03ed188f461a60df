//! Reading and validating the JSON content files.

use super::{About, Content, Cv, Links, Meta, Work};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Subdirectory of the data dir holding the JSON files.
pub const CONTENT_DIR: &str = "content";

/// Every file [`load_all`] reads, in load order.
pub const CONTENT_FILES: [&str; 5] = ["meta.json", "about.json", "work.json", "cv.json", "links.json"];

/// Load and validate all content under `<data_dir>/content/`.
pub fn load_all(data_dir: &Path) -> Result<Content> {
    let dir = data_dir.join(CONTENT_DIR);
    let meta = fs::metadata(&dir).map_err(|source| Error::ContentDir {
        path: dir.clone(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(Error::ContentDir {
            path: dir.clone(),
            source: std::io::Error::other("not a directory"),
        });
    }

    let content = Content {
        meta: load(&dir, "meta.json", validate_meta)?,
        about: load(&dir, "about.json", validate_about)?,
        work: load(&dir, "work.json", validate_work)?,
        cv: load(&dir, "cv.json", validate_cv)?,
        links: load(&dir, "links.json", validate_links)?,
    };
    debug!(
        dir = %dir.display(),
        projects = content.work.projects.len(),
        links = content.links.links.len(),
        "content loaded"
    );
    Ok(content)
}

fn load<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    validate: fn(&T) -> std::result::Result<(), String>,
) -> Result<T> {
    let raw = fs::read_to_string(dir.join(file)).map_err(|source| Error::Read { file, source })?;
    let value: T = serde_json::from_str(&raw).map_err(|source| Error::Parse { file, source })?;
    validate(&value).map_err(|reason| Error::Invalid { file, reason })?;
    Ok(value)
}

fn require(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

fn validate_meta(m: &Meta) -> std::result::Result<(), String> {
    require("name", &m.name)?;
    require("title", &m.title)?;
    require("version", &m.version)
}

fn validate_about(a: &About) -> std::result::Result<(), String> {
    require("bio", &a.bio)?;
    require("location", &a.location)
}

fn validate_work(w: &Work) -> std::result::Result<(), String> {
    if w.projects.is_empty() {
        return Err("projects list must not be empty".into());
    }
    for (i, p) in w.projects.iter().enumerate() {
        require("title", &p.title)
            .and_then(|_| require("description", &p.description))
            .map_err(|e| format!("project[{i}]: {e}"))?;
    }
    Ok(())
}

fn validate_cv(cv: &Cv) -> std::result::Result<(), String> {
    require("summary", &cv.summary)?;
    require("contact.email", &cv.contact.email)?;
    if cv.experience.is_empty() {
        return Err("experience list must not be empty".into());
    }
    for (i, e) in cv.experience.iter().enumerate() {
        require("company", &e.company)
            .and_then(|_| require("role", &e.role))
            .map_err(|err| format!("experience[{i}]: {err}"))?;
    }
    if cv.skills.is_empty() {
        return Err("skills list must not be empty".into());
    }
    Ok(())
}

fn validate_links(l: &Links) -> std::result::Result<(), String> {
    if l.links.is_empty() {
        return Err("links list must not be empty".into());
    }
    for (i, link) in l.links.iter().enumerate() {
        require("label", &link.label)
            .and_then(|_| require("url", &link.url))
            .map_err(|e| format!("link[{i}]: {e}"))?;
    }
    Ok(())
}
