use super::FormState;
use crate::catalog::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;

/// Gives every catalog category that has no selection one uniformly chosen
/// selectable option. Returns the names of the categories it filled, in
/// catalog order.
pub fn random_fill<R: Rng + ?Sized>(
    state: &mut FormState,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<String> {
    let mut filled = Vec::new();
    for category in catalog.categories() {
        if !state.selection(category.name()).is_empty() {
            continue;
        }
        let options: Vec<&str> = category.selectable().collect();
        let Some(choice) = options.choose(&mut *rng) else {
            continue;
        };
        state.set_sole_selection(category.name(), choice);
        filled.push(category.name().to_string());
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{is_header, Category};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::from_categories(vec![
            Category::new(
                "Lighting",
                vec![
                    "— Natural —".to_string(),
                    "Golden-hour glow".to_string(),
                    "Overcast".to_string(),
                    "— Artificial —".to_string(),
                    "Neon".to_string(),
                ],
            ),
            Category::new("Aesthetics", vec!["Vaporwave".to_string(), "Bauhaus".to_string()]),
            Category::new("Headers only", vec!["— Soon —".to_string()]),
            Category::new("Empty", Vec::new()),
        ])
    }

    #[test]
    fn fills_only_empty_categories_with_one_selectable_option() {
        let catalog = catalog();
        let mut state = FormState::new();
        state.select(&catalog, "Aesthetics", "Bauhaus");
        state.select(&catalog, "Aesthetics", "Vaporwave");
        let mut rng = StdRng::seed_from_u64(7);

        let filled = random_fill(&mut state, &catalog, &mut rng);

        assert_eq!(filled, vec!["Lighting".to_string()]);
        let lighting = state.selection("Lighting");
        assert_eq!(lighting.len(), 1);
        assert!(!is_header(&lighting[0]));
        assert!(catalog
            .category("Lighting")
            .expect("lighting")
            .is_selectable(&lighting[0]));
        assert_eq!(
            state.selection("Aesthetics"),
            &["Bauhaus".to_string(), "Vaporwave".to_string()]
        );
        assert!(state.selection("Headers only").is_empty());
        assert!(state.selection("Empty").is_empty());
    }

    #[test]
    fn same_seed_gives_same_picks() {
        let catalog = catalog();
        let mut first = FormState::new();
        let mut second = FormState::new();
        random_fill(&mut first, &catalog, &mut StdRng::seed_from_u64(99));
        random_fill(&mut second, &catalog, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn never_picks_a_header_across_many_seeds() {
        let catalog = catalog();
        for seed in 0..200 {
            let mut state = FormState::new();
            random_fill(&mut state, &catalog, &mut StdRng::seed_from_u64(seed));
            for (_, options) in state.selections() {
                assert!(options.iter().all(|option| !is_header(option)));
            }
        }
    }

    #[test]
    fn refilling_after_clear_picks_again() {
        let catalog = catalog();
        let mut state = FormState::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_fill(&mut state, &catalog, &mut rng).len(), 2);
        assert!(random_fill(&mut state, &catalog, &mut rng).is_empty());
        state.clear_all();
        assert_eq!(random_fill(&mut state, &catalog, &mut rng).len(), 2);
    }
}
