pub mod blocks;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::deck::{Slide, SlideDeck};

pub use blocks::Block;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("site has no pages")]
    NoPages,

    #[error("more than one page is named \"{0}\"")]
    DuplicatePage(String),
}

/// An investor site: a set of named host pages, any of which may carry a
/// slide deck.
#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub title: String,
    #[serde(default)]
    pub footer: Option<String>,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub name: String,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub deck: Option<DeckSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckSpec {
    /// Display name; falls back to the page name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideSpec {
    pub id: String,
    pub title: String,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub blocks: Vec<Block>,
}

impl Site {
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let site = Self::parse(&contents)?;
        log::debug!(
            "loaded site \"{}\" with {} pages from {}",
            site.title,
            site.pages.len(),
            path.display()
        );
        Ok(site)
    }

    /// Parse a site file. Decks are not validated here; a malformed deck
    /// only disables its page's presentation.
    pub fn parse(contents: &str) -> Result<Self, SiteError> {
        let site: Site = serde_yaml::from_str(contents)?;
        if site.pages.is_empty() {
            return Err(SiteError::NoPages);
        }
        let mut seen = HashSet::new();
        for page in &site.pages {
            if !seen.insert(page.name.to_lowercase()) {
                return Err(SiteError::DuplicatePage(page.name.clone()));
            }
        }
        Ok(site)
    }

    /// Find a page by name, ignoring case.
    pub fn page_index(&self, name: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Page {
    /// Build the slide deck this page hands to its presentation controller.
    pub fn slide_deck(&self) -> Option<SlideDeck<Vec<Block>>> {
        let spec = self.deck.as_ref()?;
        let name = spec.name.clone().unwrap_or_else(|| self.name.clone());
        let slides = spec
            .slides
            .iter()
            .map(|s| Slide::new(s.id.clone(), s.title.clone(), s.blocks.clone()))
            .collect();
        Some(SlideDeck::new(name, slides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_site_parses() {
        let content = include_str!("../../../../sample-sites/investor-site.yaml");
        let site = Site::parse(content).unwrap();
        assert_eq!(site.pages.len(), 4);
        assert_eq!(site.footer.as_deref(), Some("Confidential: for prospective investors"));
        assert!(matches!(site.pages[0].blocks[0], Block::Heading(_)));

        for page in &site.pages {
            if let Some(deck) = page.slide_deck() {
                assert!(deck.validate().is_ok(), "deck on {} is invalid", page.name);
            }
        }

        let financials = &site.pages[site.page_index("financials").unwrap()];
        let deck = financials.slide_deck().unwrap();
        assert_eq!(deck.page_name(), "Financial Projections");
        assert!(deck.len() >= 3);
    }

    #[test]
    fn test_page_without_deck() {
        let site = Site::parse("title: T\npages:\n  - name: FAQ\n    blocks:\n      - paragraph: hi\n")
            .unwrap();
        assert!(site.pages[0].slide_deck().is_none());
        assert_eq!(site.pages[0].blocks, vec![Block::Paragraph("hi".into())]);
    }

    #[test]
    fn test_deck_name_defaults_to_page_name() {
        let yaml = "\
title: T
pages:
  - name: Team
    deck:
      slides:
        - id: founders
          title: Founders
          blocks:
            - people:
                - name: Ada
                  role: CEO
";
        let site = Site::parse(yaml).unwrap();
        let deck = site.pages[0].slide_deck().unwrap();
        assert_eq!(deck.page_name(), "Team");
        assert_eq!(deck.len(), 1);
        match &deck.slides()[0].content[0] {
            Block::People(people) => {
                assert_eq!(people[0].name, "Ada");
                assert_eq!(people[0].bio, None);
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn test_empty_deck_still_loads() {
        let yaml = "title: T\npages:\n  - name: Overview\n    deck:\n      slides: []\n";
        let site = Site::parse(yaml).unwrap();
        let deck = site.pages[0].slide_deck().unwrap();
        assert!(deck.validate().is_err());
    }

    #[test]
    fn test_structured_blocks() {
        let yaml = "\
title: T
pages:
  - name: Numbers
    blocks:
      - metrics:
          - label: ARR
            value: $4.2M
            note: up 3x
      - quote:
          text: Best in class
          by: An analyst
      - table:
          headers: [Year, Revenue]
          rows:
            - ['2025', $4M]
";
        let site = Site::parse(yaml).unwrap();
        let blocks = &site.pages[0].blocks;
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::Metrics(m) if m[0].note.as_deref() == Some("up 3x")));
        assert!(matches!(&blocks[1], Block::Quote { by: Some(b), .. } if b == "An analyst"));
        assert!(matches!(&blocks[2], Block::Table { rows, .. } if rows[0][1] == "$4M"));
    }

    #[test]
    fn test_no_pages_is_error() {
        let err = Site::parse("title: T\npages: []\n").unwrap_err();
        assert!(matches!(err, SiteError::NoPages));
    }

    #[test]
    fn test_duplicate_page_is_error() {
        let err = Site::parse("title: T\npages:\n  - name: FAQ\n  - name: faq\n").unwrap_err();
        assert!(matches!(err, SiteError::DuplicatePage(ref n) if n == "faq"));
    }

    #[test]
    fn test_unknown_block_is_parse_error() {
        let err = Site::parse("title: T\npages:\n  - name: A\n    blocks:\n      - video: x\n")
            .unwrap_err();
        assert!(matches!(err, SiteError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Site::load(Path::new("/nonexistent/site.yaml")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
