//! Derived statistics over reviews.
//!
//! Everything here is pure and computed on demand from rows the caller has
//! already loaded.

use crate::models::{Review, ReviewWithBook, TopUser, UserProfile, UserStats};

pub const DEFAULT_TOP_USERS: usize = 10;

/// Mean rating rounded to one decimal place, or 0 when there are no reviews.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    let mean = sum as f64 / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[must_use]
pub fn review_count(reviews: &[Review]) -> i32 {
    i32::try_from(reviews.len()).unwrap_or(i32::MAX)
}

/// The author the user reviewed most often. Ties go to the author seen first.
#[must_use]
pub fn favorite_author(reviews: &[ReviewWithBook]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for entry in reviews {
        let author = entry.book.author.as_str();
        match counts.iter_mut().find(|(a, _)| *a == author) {
            Some((_, n)) => *n += 1,
            None => counts.push((author, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (author, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((author, n));
        }
    }

    best.map(|(author, _)| author.to_string())
}

#[must_use]
pub fn user_stats(user: &UserProfile, reviews: &[ReviewWithBook]) -> UserStats {
    let plain: Vec<Review> = reviews.iter().map(|r| r.review.clone()).collect();

    UserStats {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        review_count: review_count(&plain),
        average_rating: average_rating(&plain),
        favorite_genre: favorite_author(reviews),
    }
}

/// Leaderboard by review count, highest first.
///
/// The sort is stable, so users with equal counts keep their input order
/// (ascending id when the input comes from `list_users`).
#[must_use]
pub fn top_users(users: Vec<(UserProfile, Vec<Review>)>, limit: usize) -> Vec<TopUser> {
    let mut ranked: Vec<TopUser> = users
        .into_iter()
        .map(|(user, reviews)| TopUser {
            id: user.id,
            name: user.name,
            email: user.email,
            review_count: review_count(&reviews),
            average_rating: average_rating(&reviews),
        })
        .collect();

    ranked.sort_by(|a, b| b.review_count.cmp(&a.review_count));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;

    fn review(id: i32, user_id: i32, rating: i32) -> Review {
        Review {
            id,
            rating,
            text: String::new(),
            user_id,
            book_id: 1,
        }
    }

    fn by_author(id: i32, author: &str) -> ReviewWithBook {
        ReviewWithBook {
            review: review(id, 1, 4),
            book: Book {
                id,
                title: format!("Book {id}"),
                author: author.to_string(),
            },
        }
    }

    fn user(id: i32) -> UserProfile {
        UserProfile {
            id,
            email: format!("u{id}@x.com"),
            name: format!("user{id}"),
            role: "USER".to_string(),
        }
    }

    #[test]
    fn average_of_no_reviews_is_zero() {
        assert!(average_rating(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let ratings = [review(1, 1, 4), review(2, 1, 5)];
        assert!((average_rating(&ratings) - 4.5).abs() < f64::EPSILON);

        let ratings = [review(1, 1, 3), review(2, 1, 3), review(3, 1, 4)];
        assert!((average_rating(&ratings) - 3.3).abs() < f64::EPSILON);

        let ratings = [review(1, 1, 4), review(2, 1, 4), review(3, 1, 5)];
        assert!((average_rating(&ratings) - 4.3).abs() < f64::EPSILON);

        let ratings = [review(1, 1, 2), review(2, 1, 3), review(3, 1, 3), review(4, 1, 3)];
        assert!((average_rating(&ratings) - 2.8).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_reviews() {
        assert_eq!(review_count(&[]), 0);
        assert_eq!(review_count(&[review(1, 1, 5), review(2, 1, 1)]), 2);
    }

    #[test]
    fn favorite_author_is_most_reviewed() {
        let reviews = [by_author(1, "A"), by_author(2, "A"), by_author(3, "B")];
        assert_eq!(favorite_author(&reviews).as_deref(), Some("A"));

        let reviews = [by_author(1, "B"), by_author(2, "A"), by_author(3, "A")];
        assert_eq!(favorite_author(&reviews).as_deref(), Some("A"));
    }

    #[test]
    fn favorite_author_tie_goes_to_first_seen() {
        let reviews = [by_author(1, "B"), by_author(2, "A")];
        assert_eq!(favorite_author(&reviews).as_deref(), Some("B"));
    }

    #[test]
    fn favorite_author_of_nothing() {
        assert_eq!(favorite_author(&[]), None);
    }

    #[test]
    fn stats_for_user() {
        let reviews = [by_author(1, "Machado de Assis"), by_author(2, "Jorge Amado")];
        let stats = user_stats(&user(1), &reviews);
        assert_eq!(stats.review_count, 2);
        assert!((stats.average_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats.favorite_genre.as_deref(), Some("Machado de Assis"));
    }

    #[test]
    fn top_users_ranks_by_review_count() {
        let users = vec![
            (user(1), vec![review(1, 1, 5)]),
            (user(2), vec![review(2, 2, 3), review(3, 2, 4), review(4, 2, 5)]),
            (user(3), vec![]),
            (user(4), vec![review(5, 4, 2)]),
        ];

        let top = top_users(users, DEFAULT_TOP_USERS);
        let ids: Vec<i32> = top.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
        assert_eq!(top[0].review_count, 3);
        assert!((top[0].average_rating - 4.0).abs() < f64::EPSILON);
        assert!(top[3].average_rating.abs() < f64::EPSILON);
    }

    #[test]
    fn top_users_respects_limit() {
        let users = (1..=5).map(|id| (user(id), vec![])).collect();
        let top = top_users(users, 2);
        let ids: Vec<i32> = top.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
