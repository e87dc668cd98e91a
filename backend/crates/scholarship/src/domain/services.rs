//! Domain Services
//!
//! Pure helpers shared by the use cases.

use crate::domain::entities::Review;

/// `sum / count`, or 0 when there are no reviews
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating.value())).sum();
    f64::from(sum) / reviews.len() as f64
}

/// Search term as a `LIKE`/`ILIKE` pattern with wildcards escaped.
/// Blank input means no filter.
pub fn search_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Case-insensitive containment, the in-memory counterpart of
/// [`search_pattern`]
pub fn matches_search(haystacks: &[&str], term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Rating;
    use auth::domain::Email;
    use chrono::Utc;
    use kernel::id::{ReviewId, ScholarshipId};

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::new(),
            scholarship_id: ScholarshipId::new(),
            scholarship_name: None,
            university_name: None,
            user_email: Email::new("a@x.com").unwrap(),
            user_name: None,
            user_image: None,
            rating: Rating::new(rating).unwrap(),
            comment: String::new(),
            review_date: Utc::now(),
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[review(4)]), 4.0);
        assert_eq!(average_rating(&[review(5), review(4), review(3)]), 4.0);
        assert_eq!(average_rating(&[review(5), review(4)]), 4.5);
    }

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("  ")), None);
        assert_eq!(search_pattern(Some("tokyo")).as_deref(), Some("%tokyo%"));
        assert_eq!(search_pattern(Some("100%_a")).as_deref(), Some("%100\\%\\_a%"));
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search(&["Tokyo University", "Masters"], "tokyo"));
        assert!(matches_search(&["Tokyo University", "Masters"], "MAST"));
        assert!(!matches_search(&["Tokyo University"], "kyoto"));
    }
}
