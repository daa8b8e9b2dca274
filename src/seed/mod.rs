//! Populate the index with mock travel inventory

pub mod inventory;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use inventory::{Inventory, Season};

use crate::search::VectorIndex;

/// Generate inventory for `season` and index one passage per offer.
/// Returns the number of passages written.
pub async fn seed_index(index: &VectorIndex, season: &Season, seed: Option<u64>) -> Result<usize> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let inventory = Inventory::generate(season, &mut rng);
    tracing::info!(
        "Generated {} flights, {} car rentals, {} hotel stays",
        inventory.flights.len(),
        inventory.cars.len(),
        inventory.hotels.len()
    );
    index.insert(inventory.passages()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::search::SimilarityIndex;
    use crate::search::vector::tests::test_index;

    #[tokio::test]
    async fn test_seed_index() {
        let index = test_index(vec!["flight", "car rental", "standard room"]).await;
        let season = Season::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        );

        let count = seed_index(&index, &season, Some(9)).await.unwrap();

        assert_eq!(count, 133 + 181 + 181);
        assert_eq!(index.count().await.unwrap(), count);

        let results = index.search("standard room in Paris", 5).await.unwrap();
        assert_eq!(results.len(), 5);
        for r in results {
            assert!(r.id.unwrap().starts_with("hotel:"));
        }
    }
}
