//! Name tables for generated actors

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::actor::Gender;

const MALE_FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Paul", "Steven", "Andrew", "Kenneth",
    "George", "Kevin", "Brian", "Edward", "Peter", "Andreas", "Stefan", "Christian", "Markus",
    "Martin", "Alexander", "Patrick", "Florian", "Lukas", "Tobias", "Jakob", "Felix", "Matthias",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Nancy", "Lisa", "Betty", "Sandra", "Ashley", "Emily", "Donna", "Michelle", "Anna",
    "Maria", "Julia", "Laura", "Katharina", "Sabine", "Claudia", "Birgit", "Elisabeth", "Lena",
    "Hannah", "Sophie", "Magdalena", "Theresa", "Johanna", "Verena", "Christina", "Eva",
];

const NEUTRAL_FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Robin", "Kim", "Charlie", "Jordan", "Taylor", "Morgan", "Casey", "Jamie",
    "Riley", "Avery", "Quinn", "Sascha", "Toni", "Luca",
];

const FAMILY_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson", "Anderson",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark",
    "Gruber", "Huber", "Bauer", "Wagner", "Pichler", "Steiner", "Moser", "Mayer", "Hofer",
    "Leitner", "Berger", "Fuchs", "Eder", "Fischer", "Schmid", "Winkler", "Weber", "Schwarz",
    "Maier", "Schneider", "Reiter", "Mayr", "Schmidt", "Wimmer", "Egger", "Brunner", "Lang",
];

pub fn first_name(gender: Gender, rng: &mut impl Rng) -> String {
    let table = match gender {
        Gender::Male => MALE_FIRST_NAMES,
        Gender::Female => FEMALE_FIRST_NAMES,
        Gender::Other => NEUTRAL_FIRST_NAMES,
    };
    table.choose(rng).copied().unwrap_or("Alex").to_string()
}

pub fn family_name(rng: &mut impl Rng) -> String {
    FAMILY_NAMES.choose(rng).copied().unwrap_or("Smith").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_names_are_deterministic_for_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(first_name(Gender::Female, &mut a), first_name(Gender::Female, &mut b));
        assert_eq!(family_name(&mut a), family_name(&mut b));
    }

    #[test]
    fn test_first_name_uses_gendered_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let name = first_name(Gender::Other, &mut rng);
        assert!(NEUTRAL_FIRST_NAMES.contains(&name.as_str()));
    }
}
