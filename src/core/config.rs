//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Rates are expressed per simulated
//! hour unless the name says otherwise.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for the simulation systems
///
/// These values have been tuned to keep a mid-sized town busy without the
/// population collapsing or exploding within a few simulated weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === TIME ===
    /// Simulated hours that make up one year of ageing
    ///
    /// One week (168 h) per year keeps generational turnover visible on
    /// human observation timescales.
    pub hours_per_year: f64,

    /// Largest elapsed-hours delta the runner feeds into a single step
    ///
    /// The engine never subdivides a step; callers chunk long deltas so
    /// commuting and activity progress keep their granularity.
    pub max_step_hours: f64,

    // === MOVEMENT ===
    /// Travel speed of a penniless actor (world units per hour)
    pub base_travel_speed: f64,

    /// Extra speed a very wealthy actor gains (private transport)
    ///
    /// Speed = base + bonus * wealth / (wealth + wealth_travel_half_point),
    /// so half the bonus is reached at `wealth_travel_half_point`.
    pub wealth_travel_bonus: f64,
    /// Wealth at which an actor gets half of `wealth_travel_bonus`
    pub wealth_travel_half_point: f64,

    // === NEEDS ===
    /// Food lost per hour regardless of activity
    pub food_decay: f64,
    /// Sleep lost per hour regardless of activity
    pub sleep_decay: f64,
    /// Work-free time regained per hour regardless of activity
    pub free_time_recovery: f64,

    /// Food gained per hour while eating
    pub eating_gain: f64,
    /// Sleep gained per hour while sleeping (before the unconditional decay)
    pub sleeping_gain: f64,
    /// Work-free time drained per hour while working
    pub working_drain: f64,

    /// Below this food level an actor goes to eat right away
    pub hungry_threshold: f64,
    /// Below this food level an actor walks home to eat even at night
    pub starving_threshold: f64,
    /// Below this food level an actor eats when nothing else is pressing
    pub peckish_threshold: f64,
    /// Below this sleep level an actor goes to bed whatever the hour
    pub exhausted_threshold: f64,
    /// Non-core shifts are only worked while free time stays above this
    pub overtime_threshold: f64,

    // === ECONOMY ===
    /// Cost per hour of eating at a food shop
    ///
    /// Prices are charged per hour of the activity, so a longer meal costs
    /// more. Wealth never drops below zero; a broke actor still eats.
    pub shop_meal_price: f64,
    /// Cost per hour of eating at home (groceries)
    pub home_meal_price: f64,
    /// Cost per hour spent at a club
    pub club_price: f64,
    /// Cost per hour spent at a gym
    pub gym_price: f64,
    /// Furthest a food shop may be for a lunch break
    pub lunch_distance: f64,
    /// Unemployed actors poorer than this go job hunting
    pub job_hunt_wealth_threshold: f64,
    /// Nearest industries / food shops considered while job hunting
    pub job_hunt_nearby: usize,
    /// Random world workplaces considered while job hunting
    pub job_hunt_random: usize,
    /// Chance per hour of being let go when the employer is over half full
    pub firing_rate: f64,

    // === EDUCATION ===
    /// Years of education gained per hour of attendance
    ///
    /// At 1/30 a pupil attending ~6 h on each of 5 work days gains one year
    /// of education per simulated year.
    pub education_per_hour: f64,

    // === LIFE CYCLE ===
    /// Age at which children start attending school
    pub school_age: f64,
    /// Age from which actors may work, hunt for jobs and take partners
    ///
    /// Must lie between `school_age` and `retirement_age`.
    pub adult_age: f64,
    /// Upper bound (exclusive) of the age band that attends school / university
    pub study_age_limit: f64,
    /// Employed actors leave their job once they reach this age
    pub retirement_age: f64,
    /// Women older than this no longer conceive
    pub female_fertility_limit: f64,
    /// Men older than this no longer father children
    pub male_fertility_limit: f64,
    /// Multiplier on the age-banded yearly mortality table
    ///
    /// 0 disables deaths entirely. Scaled yearly probabilities are capped at
    /// 1, which makes death certain within the step.
    pub mortality_scale: f64,
    /// Expected children per simulated year for a fertile couple at home together
    pub birth_rate_per_year: f64,
    /// Growth per simulated year of the connection-sum preference of unpartnered adults
    pub partner_desire_growth: f64,
    /// Ceiling of the connection-sum preference
    pub max_connection_preference: f64,
    /// Factor applied to the connection-sum preference of a widowed actor
    pub widowed_desire_boost: f64,

    // === SOCIAL ===
    /// Friends whose age differs by more than this are not visited
    pub friend_age_band: f64,
    /// Connection strength above which a pair may become partners
    pub dating_threshold: f64,
    /// Above this strength each encounter only adds `trickle_increment`
    pub trickle_threshold: f64,
    /// Strength added per encounter once past `trickle_threshold`
    ///
    /// Keeps one long friendship from soaking up the whole social budget.
    pub trickle_increment: f64,
    /// Strength lost per hour by every connection, applied every step
    ///
    /// A connection formed by one encounter (strength 1) fades within
    /// 1 / connection_decay hours unless it is renewed.
    pub connection_decay: f64,
    /// Most connections an actor keeps; the weakest is evicted beyond this
    pub max_connections: usize,

    // === HISTORY ===
    /// Rolling window kept at tick resolution
    pub history_window_hours: f64,
    /// Simulated hours between two long-term entries
    pub long_term_cadence_hours: f64,
    /// Maximum long-term entries handed to charts
    pub long_term_display_cap: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hours_per_year: 168.0,
            max_step_hours: 0.25,

            base_travel_speed: 60.0,
            wealth_travel_bonus: 240.0,
            wealth_travel_half_point: 5_000.0,

            // Need rates (sleep gain must beat sleep decay by a margin)
            food_decay: 0.06,
            sleep_decay: 0.05,
            free_time_recovery: 0.05,
            eating_gain: 1.2,
            sleeping_gain: 0.16,
            working_drain: 0.12,

            // Need thresholds (starving < hungry < peckish)
            hungry_threshold: 0.3,
            starving_threshold: 0.1,
            peckish_threshold: 0.5,
            exhausted_threshold: 0.2,
            overtime_threshold: 0.5,

            shop_meal_price: 12.0,
            home_meal_price: 4.0,
            club_price: 8.0,
            gym_price: 3.0,
            lunch_distance: 80.0,
            job_hunt_wealth_threshold: 10_000.0,
            job_hunt_nearby: 3,
            job_hunt_random: 3,
            firing_rate: 0.002,

            education_per_hour: 1.0 / 30.0,

            school_age: 6.0,
            adult_age: 18.0,
            study_age_limit: 25.0,
            retirement_age: 65.0,
            female_fertility_limit: 45.0,
            male_fertility_limit: 60.0,
            mortality_scale: 1.0,
            birth_rate_per_year: 0.6,
            partner_desire_growth: 2.0,
            max_connection_preference: 150.0,
            widowed_desire_boost: 2.0,

            friend_age_band: 10.0,
            dating_threshold: 10.0,
            trickle_threshold: 20.0,
            trickle_increment: 0.1,
            connection_decay: 0.01,
            max_connections: 30,

            history_window_hours: 24.0,
            long_term_cadence_hours: 0.1,
            long_term_display_cap: 500,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Years of ageing produced by `elapsed_hours`
    pub fn years(&self, elapsed_hours: f64) -> f64 {
        elapsed_hours / self.hours_per_year
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.hours_per_year <= 0.0 {
            return Err(SimError::InvalidConfig(
                "hours_per_year must be positive".into(),
            ));
        }

        if self.max_step_hours <= 0.0 {
            return Err(SimError::InvalidConfig(
                "max_step_hours must be positive".into(),
            ));
        }

        if !(self.starving_threshold < self.hungry_threshold
            && self.hungry_threshold < self.peckish_threshold)
        {
            return Err(SimError::InvalidConfig(format!(
                "food thresholds must be ordered: starving ({}) < hungry ({}) < peckish ({})",
                self.starving_threshold, self.hungry_threshold, self.peckish_threshold
            )));
        }

        if self.sleeping_gain <= self.sleep_decay {
            return Err(SimError::InvalidConfig(format!(
                "sleeping_gain ({}) must exceed sleep_decay ({})",
                self.sleeping_gain, self.sleep_decay
            )));
        }

        if !(self.school_age < self.adult_age && self.adult_age < self.retirement_age) {
            return Err(SimError::InvalidConfig(
                "age bands must be ordered: school < adult < retirement".into(),
            ));
        }

        if self.dating_threshold <= 0.0 || self.trickle_increment <= 0.0 {
            return Err(SimError::InvalidConfig(
                "dating_threshold and trickle_increment must be positive".into(),
            ));
        }

        if self.max_connections == 0 {
            return Err(SimError::InvalidConfig(
                "max_connections must be at least 1".into(),
            ));
        }

        if self.mortality_scale < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "mortality_scale ({}) must not be negative",
                self.mortality_scale
            )));
        }

        if self.connection_decay <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "connection_decay ({}) must be positive",
                self.connection_decay
            )));
        }

        if self.long_term_display_cap < 2 {
            return Err(SimError::InvalidConfig(
                "long_term_display_cap must be at least 2".into(),
            ));
        }

        Ok(())
    }
}
