use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::deck::DeckError;
use crate::site::{Page, Site};

/// Outcome of checking one page.
#[derive(Debug, PartialEq)]
pub enum PageReport {
    NoDeck,
    Ready {
        deck_name: String,
        slides: usize,
        empty_slides: Vec<String>,
    },
    Malformed(DeckError),
}

pub fn check_page(page: &Page) -> PageReport {
    let Some(deck) = page.slide_deck() else {
        return PageReport::NoDeck;
    };
    if let Err(e) = deck.validate() {
        return PageReport::Malformed(e);
    }
    let empty_slides = deck
        .slides()
        .iter()
        .filter(|s| s.content.iter().map(|b| b.text_len()).sum::<usize>() == 0)
        .map(|s| s.id.clone())
        .collect();
    PageReport::Ready {
        deck_name: deck.page_name().to_string(),
        slides: deck.len(),
        empty_slides,
    }
}

pub fn run(file: &Path) -> Result<()> {
    let site = Site::load(file).with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{} {}", site.title.bold(), format!("({})", file.display()).dimmed());

    let mut malformed = 0;
    for page in &site.pages {
        match check_page(page) {
            PageReport::NoDeck => {
                println!("  {} {} {}", "-".dimmed(), page.name, "(no deck)".dimmed());
            }
            PageReport::Ready {
                deck_name,
                slides,
                empty_slides,
            } => {
                println!(
                    "  {} {} \u{2014} {} ({} slides)",
                    "\u{2713}".green(),
                    page.name,
                    deck_name,
                    slides
                );
                for id in empty_slides {
                    println!("      {} slide \"{id}\" has no content", "warning:".yellow());
                }
            }
            PageReport::Malformed(err) => {
                malformed += 1;
                println!("  {} {}: {err}", "\u{2717}".red(), page.name);
            }
        }
    }

    if malformed > 0 {
        anyhow::bail!("{malformed} malformed deck(s) in {}", file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(yaml: &str) -> Site {
        Site::parse(yaml).unwrap()
    }

    #[test]
    fn test_sample_site_is_clean() {
        let site = site(include_str!("../../../../sample-sites/investor-site.yaml"));
        for page in &site.pages {
            match check_page(page) {
                PageReport::Ready { empty_slides, .. } => assert!(empty_slides.is_empty()),
                PageReport::NoDeck => assert_eq!(page.name, "FAQ"),
                PageReport::Malformed(e) => panic!("{e}"),
            }
        }
    }

    #[test]
    fn test_reports_duplicate_ids() {
        let site = site(
            "title: T\npages:\n  - name: A\n    deck:\n      slides:\n        - {id: x, title: One}\n        - {id: x, title: Two}\n",
        );
        assert!(matches!(
            check_page(&site.pages[0]),
            PageReport::Malformed(DeckError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_reports_empty_slides() {
        let site = site(
            "title: T\npages:\n  - name: A\n    deck:\n      name: Pitch\n      slides:\n        - {id: x, title: One}\n",
        );
        assert_eq!(
            check_page(&site.pages[0]),
            PageReport::Ready {
                deck_name: "Pitch".to_string(),
                slides: 1,
                empty_slides: vec!["x".to_string()],
            }
        );
    }
}
