//! GIF selection. One search, uniform random pick, `None` on any failure.

use crate::domain::MediaResult;
use crate::ports::MediaSearch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::{error, warn};

/// Pick one result uniformly at random and return its GIF URL.
///
/// `None` for an empty slice or when the chosen result has no GIF rendition.
pub fn choose_gif<R: Rng + ?Sized>(results: &[MediaResult], rng: &mut R) -> Option<String> {
    if results.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..results.len());
    results[idx].gif_url.clone()
}

pub struct MediaPicker {
    search: Arc<dyn MediaSearch>,
    query: String,
    limit: u32,
    rng: Mutex<StdRng>,
}

impl MediaPicker {
    pub fn new(search: Arc<dyn MediaSearch>, query: String, limit: u32) -> Self {
        Self::with_rng(search, query, limit, StdRng::from_entropy())
    }

    /// Deterministic picker for tests.
    pub fn with_rng(search: Arc<dyn MediaSearch>, query: String, limit: u32, rng: StdRng) -> Self {
        Self {
            search,
            query,
            limit,
            rng: Mutex::new(rng),
        }
    }

    /// One GIF URL for the configured query, or `None` ("none found").
    pub async fn pick(&self) -> Option<String> {
        let results = match self.search.search(&self.query, self.limit).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, query = %self.query, "failed to fetch GIF");
                return None;
            }
        };
        if results.is_empty() {
            warn!(query = %self.query, "no GIFs found");
            return None;
        }

        let chosen = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            choose_gif(&results, &mut *rng)
        };
        if chosen.is_none() {
            warn!(query = %self.query, "chosen result has no GIF rendition");
        }
        chosen
    }
}
