use super::category::CategoryRatings;
use super::score::round_to_nearest_half;
use serde::Serialize;
use std::fmt;

/// Characters used to draw a five-star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarGlyphs {
    pub filled: char,
    pub half: char,
    pub empty: char,
}

impl StarGlyphs {
    pub const STANDARD: Self = Self {
        filled: '★',
        half: '⯪',
        empty: '☆',
    };

    /// Draws the half star with the empty outline.
    pub const OUTLINE_HALF: Self = Self {
        filled: '★',
        half: '☆',
        empty: '☆',
    };
}

impl Default for StarGlyphs {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Filled, half and empty star counts for a score. Always five stars in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    pub const MAX_STARS: u8 = 5;

    /// Scores outside [0, 5] are clamped first; NaN counts as zero.
    pub fn from_score(score: f64) -> Self {
        let clamped = if score.is_nan() {
            CategoryRatings::MIN
        } else {
            score.clamp(CategoryRatings::MIN, CategoryRatings::MAX)
        };
        let rounded = round_to_nearest_half(clamped);
        let full = rounded.floor() as u8;
        let half = rounded.fract() != 0.0;
        let empty = Self::MAX_STARS - full - u8::from(half);

        Self { full, half, empty }
    }

    pub fn render(&self, glyphs: &StarGlyphs) -> String {
        let mut out = String::with_capacity(Self::MAX_STARS as usize * 3);
        out.extend(std::iter::repeat(glyphs.filled).take(self.full as usize));
        if self.half {
            out.push(glyphs.half);
        }
        out.extend(std::iter::repeat(glyphs.empty).take(self.empty as usize));
        out
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&StarGlyphs::STANDARD))
    }
}

/// Star string for `score` using the standard glyphs.
pub fn render_star_glyphs(score: f64) -> String {
    StarRating::from_score(score).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_renders_five_empty_stars() {
        assert_eq!(render_star_glyphs(0.0), "☆☆☆☆☆");
    }

    #[test]
    fn five_renders_five_filled_stars() {
        assert_eq!(render_star_glyphs(5.0), "★★★★★");
    }

    #[test]
    fn half_star_sits_between_filled_and_empty() {
        let stars = StarRating::from_score(2.5);
        assert_eq!(
            stars,
            StarRating {
                full: 2,
                half: true,
                empty: 2
            }
        );
        assert_eq!(render_star_glyphs(2.5), "★★⯪☆☆");
    }

    #[test]
    fn rounds_to_the_nearest_half_before_drawing() {
        assert_eq!(render_star_glyphs(3.74), "★★★⯪☆");
        assert_eq!(render_star_glyphs(3.75), "★★★★☆");
        assert_eq!(render_star_glyphs(4.24), "★★★★☆");
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(render_star_glyphs(7.2), "★★★★★");
        assert_eq!(render_star_glyphs(-3.0), "☆☆☆☆☆");
        assert_eq!(render_star_glyphs(f64::NAN), "☆☆☆☆☆");
        assert_eq!(render_star_glyphs(f64::INFINITY), "★★★★★");
    }

    #[test]
    fn always_draws_five_glyphs() {
        for step in 0..=20 {
            let score = f64::from(step) * 0.25;
            assert_eq!(render_star_glyphs(score).chars().count(), 5, "{score}");
        }
    }

    #[test]
    fn outline_half_draws_half_as_empty() {
        let stars = StarRating::from_score(1.5);
        assert_eq!(stars.render(&StarGlyphs::OUTLINE_HALF), "★☆☆☆☆");
    }
}
