use bookreview::config::Config;
use bookreview::db::Store;
use bookreview::domain::{AuthIdentity, DomainError};
use bookreview::models::{
    CreateBookInput, CreateReviewInput, LoginInput, RegisterInput, UpdateBookInput,
    UpdateReviewInput,
};
use bookreview::services::seed::{CATALOGUE, seed_books};
use bookreview::state::SharedState;

async fn shared() -> SharedState {
    let mut config = Config::default();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let store = Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store");
    SharedState::with_store(config, store).expect("Failed to build services")
}

async fn register(state: &SharedState, email: &str, name: &str) -> AuthIdentity {
    let payload = state
        .auth_service
        .register(RegisterInput {
            email: email.to_string(),
            name: name.to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    state.tokens.verify(&payload.token).unwrap()
}

fn book(title: &str, author: &str) -> CreateBookInput {
    CreateBookInput {
        title: title.to_string(),
        author: author.to_string(),
    }
}

#[tokio::test]
async fn register_issues_token_for_new_user() {
    let state = shared().await;
    let identity = register(&state, "a@x.com", "alice").await;

    assert_eq!(identity.email, "a@x.com");
    assert_eq!(identity.name, "alice");

    let user = state.auth_service.validate_user(identity.id).await.unwrap();
    assert_eq!(user.role, "USER");
    assert!(state.auth_service.get_user_by_id(9999).await.unwrap().is_none());

    let err = state.auth_service.validate_user(9999).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("User")));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let state = shared().await;
    let identity = register(&state, "a@x.com", "alice").await;

    let (_, hash) = state
        .store
        .get_user_credentials(identity.id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(hash, "secret1");
    assert!(state.hasher.verify("secret1", &hash));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let state = shared().await;
    register(&state, "a@x.com", "alice").await;

    let ok = state
        .auth_service
        .login(LoginInput {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ok.user.name, "alice");

    let err = state
        .auth_service
        .login(LoginInput {
            email: "a@x.com".to_string(),
            password: "nope-nope".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn update_book_rejects_duplicate_pair() {
    let state = shared().await;
    let books = &state.book_service;

    let dom = books
        .create_book(book("Dom Casmurro", "Machado de Assis"))
        .await
        .unwrap();
    let other = books
        .create_book(book("Iracema", "José de Alencar"))
        .await
        .unwrap();

    let err = books
        .update_book(
            other.id,
            UpdateBookInput {
                title: Some("Dom Casmurro".to_string()),
                author: Some("Machado de Assis".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A book with this title and author already exists"
    );

    // Renaming a book to its own title is not a conflict.
    let same = books
        .update_book(
            dom.id,
            UpdateBookInput {
                title: Some("Dom Casmurro".to_string()),
                author: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(same, dom);

    let err = books
        .update_book(
            9999,
            UpdateBookInput {
                title: Some("X".to_string()),
                author: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Book not found");
}

#[tokio::test]
async fn review_text_defaults_to_empty() {
    let state = shared().await;
    let alice = register(&state, "a@x.com", "alice").await;
    let book = state
        .book_service
        .create_book(book("Macunaíma", "Mário de Andrade"))
        .await
        .unwrap();

    let review = state
        .review_service
        .create_review(
            &alice,
            CreateReviewInput {
                book_id: book.id,
                rating: 4,
                text: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(review.text, "");
    assert_eq!(review.user_id, alice.id);

    let updated = state
        .review_service
        .update_review(
            &alice,
            review.id,
            UpdateReviewInput {
                rating: None,
                text: Some("Revisited".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 4);
    assert_eq!(updated.text, "Revisited");
}

#[tokio::test]
async fn non_owner_cannot_touch_review() {
    let state = shared().await;
    let alice = register(&state, "a@x.com", "alice").await;
    let bob = register(&state, "b@x.com", "bob").await;
    let book = state
        .book_service
        .create_book(book("Caim", "José Saramago"))
        .await
        .unwrap();

    let review = state
        .review_service
        .create_review(
            &alice,
            CreateReviewInput {
                book_id: book.id,
                rating: 5,
                text: Some("Superb".to_string()),
            },
        )
        .await
        .unwrap();

    let err = state
        .review_service
        .delete_review(&bob, review.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFoundOrUnauthorized("Review")));

    let err = state
        .review_service
        .delete_review(&bob, review.id + 100)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFoundOrUnauthorized("Review")));

    assert!(state.review_service.get_review(review.id).await.unwrap().is_some());
}

#[tokio::test]
async fn top_users_orders_by_review_count_then_id() {
    let state = shared().await;
    let alice = register(&state, "a@x.com", "alice").await;
    let bob = register(&state, "b@x.com", "bob").await;
    let carol = register(&state, "c@x.com", "carol").await;

    let book = state
        .book_service
        .create_book(book("O Ateneu", "Raul Pompéia"))
        .await
        .unwrap();

    for identity in [&bob, &carol] {
        state
            .review_service
            .create_review(
                identity,
                CreateReviewInput {
                    book_id: book.id,
                    rating: 3,
                    text: None,
                },
            )
            .await
            .unwrap();
    }

    let top = state.user_service.top_users(10).await.unwrap();
    let ids: Vec<i32> = top.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![bob.id, carol.id, alice.id]);

    let top = state.user_service.top_users(2).await.unwrap();
    assert_eq!(top.len(), 2);
}

#[tokio::test]
async fn search_users_matches_name_or_email() {
    let state = shared().await;
    register(&state, "alice@example.com", "alice").await;
    register(&state, "bob@other.org", "bobby").await;

    let found = state.user_service.search_users("example").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "alice");

    let found = state.user_service.search_users("bob").await.unwrap();
    assert_eq!(found.len(), 1);

    let err = state.user_service.search_users("  ").await.unwrap_err();
    assert_eq!(err.to_string(), "Search query is required");

    let user = state
        .user_service
        .get_user_by_email(" bob@other.org ")
        .await
        .unwrap();
    assert_eq!(user.name, "bobby");

    let err = state.user_service.get_user_by_email("").await.unwrap_err();
    assert_eq!(err.to_string(), "Email is required");
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let state = shared().await;

    let first = seed_books(state.book_service.as_ref()).await.unwrap();
    assert_eq!(first.inserted, CATALOGUE.len());
    assert_eq!(first.skipped, 0);
    assert_eq!(first.total_books, CATALOGUE.len());

    let second = seed_books(state.book_service.as_ref()).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, CATALOGUE.len());
    assert_eq!(second.total_books, CATALOGUE.len());

    let found = state.book_service.search_books("Graciliano").await.unwrap();
    assert_eq!(found.len(), 2);
}
