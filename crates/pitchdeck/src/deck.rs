use std::collections::HashSet;

use thiserror::Error;

/// A contract violation in a deck handed to a presentation controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck \"{page_name}\" has no slides")]
    Empty { page_name: String },

    #[error("deck \"{page_name}\" has more than one slide with id \"{id}\"")]
    DuplicateId { page_name: String, id: String },
}

/// One navigable screen of a deck. `content` is owned by the host page and
/// passed through to the renderer untouched.
#[derive(Debug, Clone)]
pub struct Slide<C> {
    pub id: String,
    pub title: String,
    pub content: C,
}

impl<C> Slide<C> {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
        }
    }
}

/// A named, ordered collection of slides for one host page.
///
/// Construction never fails; call [`SlideDeck::validate`] to find out whether
/// the deck can actually be presented.
#[derive(Debug, Clone)]
pub struct SlideDeck<C> {
    page_name: String,
    slides: Vec<Slide<C>>,
}

impl<C> SlideDeck<C> {
    pub fn new(page_name: impl Into<String>, slides: Vec<Slide<C>>) -> Self {
        Self {
            page_name: page_name.into(),
            slides,
        }
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn slides(&self) -> &[Slide<C>] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide<C>> {
        self.slides.get(index)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.is_empty() {
            return Err(DeckError::Empty {
                page_name: self.page_name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for slide in &self.slides {
            if !seen.insert(slide.id.as_str()) {
                return Err(DeckError::DuplicateId {
                    page_name: self.page_name.clone(),
                    id: slide.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(ids: &[&str]) -> Vec<Slide<()>> {
        ids.iter()
            .map(|id| Slide::new(*id, id.to_uppercase(), ()))
            .collect()
    }

    #[test]
    fn test_valid_deck() {
        let deck = SlideDeck::new("Overview", slides(&["a", "b", "c"]));
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.page_name(), "Overview");
        assert_eq!(deck.get(1).map(|s| s.title.as_str()), Some("B"));
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_empty_deck_is_invalid() {
        let deck: SlideDeck<()> = SlideDeck::new("Team", Vec::new());
        assert!(deck.is_empty());
        assert_eq!(
            deck.validate(),
            Err(DeckError::Empty {
                page_name: "Team".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_id_is_invalid() {
        let deck = SlideDeck::new("FAQ", slides(&["q1", "q2", "q1"]));
        let err = deck.validate().unwrap_err();
        assert_eq!(
            err,
            DeckError::DuplicateId {
                page_name: "FAQ".to_string(),
                id: "q1".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "deck \"FAQ\" has more than one slide with id \"q1\""
        );
    }
}
