use serde::Deserialize;

/// A unit of page or slide content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Heading(String),
    Subheading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Metrics(Vec<Metric>),
    Quote {
        text: String,
        #[serde(default)]
        by: Option<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    People(Vec<Person>),
    Faq(Vec<Question>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
}

impl Block {
    /// Plain text of the block, used for `check` summaries.
    pub fn text_len(&self) -> usize {
        match self {
            Block::Heading(s) | Block::Subheading(s) | Block::Paragraph(s) => s.len(),
            Block::Bullets(items) => items.iter().map(String::len).sum(),
            Block::Metrics(metrics) => metrics
                .iter()
                .map(|m| m.label.len() + m.value.len() + m.note.as_ref().map_or(0, String::len))
                .sum(),
            Block::Quote { text, by } => text.len() + by.as_ref().map_or(0, String::len),
            Block::Table { headers, rows } => {
                headers.iter().map(String::len).sum::<usize>()
                    + rows.iter().flatten().map(String::len).sum::<usize>()
            }
            Block::People(people) => people
                .iter()
                .map(|p| p.name.len() + p.role.len() + p.bio.as_ref().map_or(0, String::len))
                .sum(),
            Block::Faq(items) => items
                .iter()
                .map(|q| q.question.len() + q.answer.len())
                .sum(),
        }
    }
}
