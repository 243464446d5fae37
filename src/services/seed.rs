//! Starter catalogue of Brazilian classics for `bookreview seed`.

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::models::CreateBookInput;
use crate::services::BookService;

pub const CATALOGUE: &[(&str, &str)] = &[
    ("Dom Casmurro", "Machado de Assis"),
    ("O Cortiço", "Aluísio Azevedo"),
    ("O Guarani", "José de Alencar"),
    ("Memórias Póstumas de Brás Cubas", "Machado de Assis"),
    ("Iracema", "José de Alencar"),
    ("A Moreninha", "Joaquim Manuel de Macedo"),
    ("O Ateneu", "Raul Pompéia"),
    ("Casa Grande & Senzala", "Gilberto Freyre"),
    ("Vidas Secas", "Graciliano Ramos"),
    ("Capitães da Areia", "Jorge Amado"),
    ("O Auto da Compadecida", "Ariano Suassuna"),
    ("Grande Sertão: Veredas", "João Guimarães Rosa"),
    ("Macunaíma", "Mário de Andrade"),
    ("São Bernardo", "Graciliano Ramos"),
    ("O Quinze", "Rachel de Queiroz"),
    ("Dona Flor e Seus Dois Maridos", "Jorge Amado"),
    ("A Hora da Estrela", "Clarice Lispector"),
    ("Cidade de Deus", "Paulo Lins"),
    ("O Vendedor de Sonhos", "Augusto Cury"),
    ("Caim", "José Saramago"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
    pub total_books: usize,
}

/// Inserts every catalogue entry that is not already present.
pub async fn seed_books(books: &dyn BookService) -> Result<SeedReport, DomainError> {
    let mut report = SeedReport::default();

    for (title, author) in CATALOGUE {
        let input = CreateBookInput {
            title: (*title).to_string(),
            author: (*author).to_string(),
        };

        match books.create_book(input).await {
            Ok(book) => {
                info!(book_id = book.id, "Added \"{}\" by {}", book.title, book.author);
                report.inserted += 1;
            }
            Err(DomainError::Conflict(_)) => {
                debug!("\"{}\" by {} already exists", title, author);
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    report.total_books = books.list_books().await?.len();
    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        total = report.total_books,
        "Book catalogue seeded"
    );

    Ok(report)
}
