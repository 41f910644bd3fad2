//! Demo survey data.
//!
//! Produces a few weeks of plausible responses so `huddle results` has
//! something to show on a fresh install.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use tracing::debug;

use crate::models::{Participant, SurveyResponse, MAX_RATING, MIN_RATING};

/// Weeks generated when none is given.
pub const DEFAULT_SAMPLE_WEEKS: usize = 6;

/// Chance that a member answered in a given week.
const RESPONSE_RATE: f64 = 0.9;

/// Chance that an answer in the latest week carries feedback.
const FEEDBACK_RATE: f64 = 0.3;

/// Generates responses for every member in every week of `week_endings`.
///
/// `week_endings` must be oldest first; week quality drifts along a slow
/// sine wave over them, and only the latest week gets feedback.
pub fn generate<R: Rng>(
    roster: &[Participant],
    week_endings: &[NaiveDate],
    rng: &mut R,
) -> Vec<SurveyResponse> {
    let mut responses = Vec::new();

    for (week_index, week_ending) in week_endings.iter().enumerate() {
        let is_latest = week_index + 1 == week_endings.len();
        let submitted_at = Utc.from_utc_datetime(&week_ending.and_time(NaiveTime::default()));

        for member in roster {
            if !rng.random_bool(RESPONSE_RATE) {
                continue;
            }

            let base = 5.0 + (week_index as f64 * 0.5).sin() * 2.0 + rng.random::<f64>() * 2.0;
            let ratings = [
                rating(3.0 + rng.random::<f64>() * 4.0),
                rating(base + rng.random::<f64>() * 2.0),
                rating(5.0 + (rng.random::<f64>() - 0.5) * 4.0),
                rating(4.0 + rng.random::<f64>() * 4.0),
                rating(base - 1.0 + rng.random::<f64>() * 2.0),
                rating(base + rng.random::<f64>() * 2.0),
                rating(base),
            ];

            let mut response =
                SurveyResponse::new(member.name(), *week_ending, ratings, submitted_at);
            if is_latest && rng.random_bool(FEEDBACK_RATE) {
                response = response.with_feedback(format!(
                    "Some feedback from {} about the recent week.",
                    member
                ));
            }
            responses.push(response);
        }
    }

    debug!(
        "Generated {} sample responses over {} weeks",
        responses.len(),
        week_endings.len()
    );
    responses
}

fn rating(value: f64) -> u8 {
    value
        .clamp(f64::from(MIN_RATING), f64::from(MAX_RATING))
        .round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::recent_week_endings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> Vec<Participant> {
        ["Max", "Nikhil", "Pavel", "Anthony", "Vahid", "Daphne", "David", "María", "Ziming"]
            .into_iter()
            .map(Participant::from)
            .collect()
    }

    fn weeks() -> Vec<NaiveDate> {
        let today = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        let mut weeks = recent_week_endings(today, DEFAULT_SAMPLE_WEEKS);
        weeks.reverse();
        weeks
    }

    #[test]
    fn test_generated_responses_are_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        let weeks = weeks();
        let responses = generate(&roster(), &weeks, &mut rng);

        assert!(!responses.is_empty());
        assert!(responses.len() <= roster().len() * weeks.len());
        for response in &responses {
            assert!(response.validate().is_ok(), "{:?}", response);
            assert!(weeks.contains(&response.week_ending));
        }
    }

    #[test]
    fn test_feedback_only_in_latest_week() {
        let mut rng = StdRng::seed_from_u64(3);
        let weeks = weeks();
        let latest = *weeks.last().unwrap();

        for response in generate(&roster(), &weeks, &mut rng) {
            if response.feedback.is_some() {
                assert_eq!(response.week_ending, latest);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic_for_seed() {
        let a = generate(&roster(), &weeks(), &mut StdRng::seed_from_u64(42));
        let b = generate(&roster(), &weeks(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_weeks_or_members_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(&roster(), &[], &mut rng).is_empty());
        assert!(generate(&[], &weeks(), &mut rng).is_empty());
    }

    #[test]
    fn test_rating_is_clamped_and_rounded() {
        assert_eq!(rating(-3.0), 1);
        assert_eq!(rating(0.4), 1);
        assert_eq!(rating(6.5), 7);
        assert_eq!(rating(6.49), 6);
        assert_eq!(rating(12.0), 10);
    }
}
