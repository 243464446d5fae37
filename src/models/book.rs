use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::entities::books;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
}

impl From<books::Model> for Book {
    fn from(model: books::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
        }
    }
}

/// A book with its rating aggregates already computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithRating {
    pub book: Book,
    pub average_rating: f64,
    pub review_count: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
}

impl CreateBookInput {
    /// Trims both fields and rejects blanks.
    pub fn normalized(self) -> Result<Self, DomainError> {
        if self.title.is_empty() || self.author.is_empty() {
            return Err(DomainError::validation("Title and author are required"));
        }

        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(DomainError::validation("Title and author cannot be empty"));
        }

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl UpdateBookInput {
    /// Trims the provided fields, dropping the ones left blank.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let title = self.title.filter(|t| !t.is_empty());
        let author = self.author.filter(|a| !a.is_empty());

        if title.is_none() && author.is_none() {
            return Err(DomainError::validation(
                "At least one field (title or author) must be provided",
            ));
        }

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if title.is_none() && author.is_none() {
            return Err(DomainError::validation("Title and author cannot be empty"));
        }

        Ok(Self { title, author })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_input_is_trimmed() {
        let input = CreateBookInput {
            title: "  Dom Casmurro ".to_string(),
            author: "Machado de Assis ".to_string(),
        }
        .normalized()
        .unwrap();
        assert_eq!(input.title, "Dom Casmurro");
        assert_eq!(input.author, "Machado de Assis");
    }

    #[test]
    fn create_book_input_rejects_blanks() {
        let err = CreateBookInput {
            title: String::new(),
            author: "Someone".to_string(),
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.to_string(), "Title and author are required");

        let err = CreateBookInput {
            title: "   ".to_string(),
            author: "Someone".to_string(),
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.to_string(), "Title and author cannot be empty");
    }

    #[test]
    fn update_book_input() {
        let err = UpdateBookInput::default().normalized().unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one field (title or author) must be provided"
        );

        let err = UpdateBookInput {
            title: Some("  ".to_string()),
            author: None,
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.to_string(), "Title and author cannot be empty");

        let input = UpdateBookInput {
            title: Some(" Iracema ".to_string()),
            author: Some("   ".to_string()),
        }
        .normalized()
        .unwrap();
        assert_eq!(input.title.as_deref(), Some("Iracema"));
        assert_eq!(input.author, None);
    }
}
