use serde::{Deserialize, Serialize};

pub const MAX_RATING: i32 = 5;
pub const MIN_RATING: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub rating: i32,
    pub review: String,
    pub user_id: i32,
    pub product_id: i32,
}

/// Review as rendered on a product page, with the reviewer's display name
/// joined in.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewView {
    pub id: i32,
    pub rating: i32,
    pub review: String,
    pub reviewer_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub review: String,
}

/// Average of the given ratings with each one clamped into
/// [MIN_RATING, MAX_RATING] first. Stored ratings are not trusted to be in
/// range. Zero reviews average to 0.0 (division by 1, never NaN).
pub fn clamped_average(ratings: &[i32]) -> f64 {
    let sum: i32 = ratings
        .iter()
        .map(|r| (*r).clamp(MIN_RATING, MAX_RATING))
        .sum();
    sum as f64 / ratings.len().max(1) as f64
}

/// Formats an average rating to one decimal place for display.
pub fn format_rating(average: f64) -> String {
    format!("{:.1}", average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_clamps_out_of_range_ratings() {
        // 7 clamps to 5, -3 clamps to 1
        assert_eq!(clamped_average(&[7, -3]), 3.0);
        assert_eq!(clamped_average(&[0, 6]), 3.0);
    }

    #[test]
    fn average_of_in_range_ratings() {
        assert_eq!(clamped_average(&[4, 5]), 4.5);
        assert_eq!(clamped_average(&[3]), 3.0);
    }

    #[test]
    fn zero_reviews_average_to_zero() {
        assert_eq!(clamped_average(&[]), 0.0);
        assert_eq!(format_rating(clamped_average(&[])), "0.0");
    }

    #[test]
    fn rating_is_formatted_to_one_decimal() {
        assert_eq!(format_rating(4.333333), "4.3");
        assert_eq!(format_rating(clamped_average(&[4, 5])), "4.5");
    }
}
