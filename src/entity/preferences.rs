//! Per-actor leisure and partner preferences

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::actor::Gender;

/// Where an actor likes to spend free time, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueAffinity {
    pub club: f64,
    pub gym: f64,
    pub park: f64,
    pub university: f64,
    pub friends: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub venues: VenueAffinity,
    /// Socialising continues until the summed connection strength reaches this
    pub min_connection_strength_sum: f64,
    pub partner_gender: Gender,
}

/// Skewed toward low values: most people are lukewarm about most venues
fn skewed_unit(rng: &mut impl Rng) -> f64 {
    (rng.gen::<f64>() * rng.gen::<f64>()).clamp(0.0, 1.0)
}

impl Preferences {
    pub fn random(gender: Gender, rng: &mut impl Rng) -> Self {
        let venues = VenueAffinity {
            club: skewed_unit(rng),
            gym: skewed_unit(rng),
            park: skewed_unit(rng),
            university: skewed_unit(rng),
            friends: skewed_unit(rng).max(0.2),
        };

        let partner_gender = match gender {
            Gender::Male if rng.gen_bool(0.9) => Gender::Female,
            Gender::Female if rng.gen_bool(0.9) => Gender::Male,
            _ => Gender::ALL[rng.gen_range(0..Gender::ALL.len())],
        };

        Self {
            venues,
            min_connection_strength_sum: rng.gen::<f64>() * 70.0,
            partner_gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_preferences_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let prefs = Preferences::random(Gender::Female, &mut rng);
            for value in [
                prefs.venues.club,
                prefs.venues.gym,
                prefs.venues.park,
                prefs.venues.university,
                prefs.venues.friends,
            ] {
                assert!((0.0..=1.0).contains(&value));
            }
            assert!((0.0..70.0).contains(&prefs.min_connection_strength_sum));
        }
    }

    #[test]
    fn test_partner_preference_mostly_opposite() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let opposite = (0..1000)
            .filter(|_| Preferences::random(Gender::Male, &mut rng).partner_gender == Gender::Female)
            .count();
        assert!(opposite > 850, "expected mostly opposite preference, got {}", opposite);
    }
}
