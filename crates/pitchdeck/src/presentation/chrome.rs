use crate::deck::SlideDeck;

/// One entry of the progress strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDot {
    pub index: usize,
    pub title: String,
    pub active: bool,
}

/// Everything the overlay chrome shows, derived from the deck and the
/// current index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub page_name: String,
    pub slide_title: String,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub dots: Vec<ProgressDot>,
}

impl Chrome {
    /// `index` must be a valid slide index.
    pub(crate) fn derive<C>(deck: &SlideDeck<C>, index: usize) -> Self {
        let total = deck.len();
        let dots = deck
            .slides()
            .iter()
            .enumerate()
            .map(|(i, s)| ProgressDot {
                index: i,
                title: s.title.clone(),
                active: i == index,
            })
            .collect();

        Self {
            page_name: deck.page_name().to_string(),
            slide_title: deck
                .get(index)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            position: index + 1,
            total,
            can_go_back: index > 0,
            can_go_forward: index + 1 < total,
            dots,
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }

    /// Fraction of the deck shown so far, for the progress bar.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.position as f32 / self.total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Slide;

    fn deck(n: usize) -> SlideDeck<()> {
        SlideDeck::new(
            "Financials",
            (0..n)
                .map(|i| Slide::new(format!("s{i}"), format!("Slide {i}"), ()))
                .collect(),
        )
    }

    #[test]
    fn test_first_slide() {
        let chrome = Chrome::derive(&deck(5), 0);
        assert_eq!(chrome.page_name, "Financials");
        assert_eq!(chrome.slide_title, "Slide 0");
        assert_eq!(chrome.progress_label(), "1 / 5");
        assert!(!chrome.can_go_back);
        assert!(chrome.can_go_forward);
        assert_eq!(chrome.dots.len(), 5);
        assert!(chrome.dots[0].active);
        assert_eq!(chrome.dots.iter().filter(|d| d.active).count(), 1);
    }

    #[test]
    fn test_last_slide() {
        let chrome = Chrome::derive(&deck(5), 4);
        assert_eq!(chrome.progress_label(), "5 / 5");
        assert!(chrome.can_go_back);
        assert!(!chrome.can_go_forward);
        assert!(chrome.dots[4].active);
        assert!((chrome.fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_single_slide_has_no_navigation() {
        let chrome = Chrome::derive(&deck(1), 0);
        assert!(!chrome.can_go_back);
        assert!(!chrome.can_go_forward);
        assert_eq!(chrome.progress_label(), "1 / 1");
    }
}
