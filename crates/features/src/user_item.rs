//! User-item rating matrix for collaborative filtering.
//!
//! Rows are distinct users, columns distinct movies, both in ascending id
//! order. Each cell is `Option<f32>`: `None` means "unrated", so a genuine
//! rating of 0.0 stays distinguishable. The dense views used for similarity
//! math write 0.0 for unrated cells.

use data_loader::{MovieId, Rating, UserId};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct UserItemMatrix {
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
    /// Row-major, `user_ids.len() * movie_ids.len()` cells
    cells: Vec<Option<f32>>,
}

/// Mean-centered matrix used as input to user-user similarity.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRatings {
    /// Dense rows: rating - user mean for rated cells, 0.0 elsewhere
    pub rows: Vec<Vec<f32>>,
    /// Mean of each user's rated cells (0.0 for a user without ratings)
    pub user_means: Vec<f32>,
}

impl UserItemMatrix {
    /// Pivot rating events into a user x movie matrix.
    ///
    /// Duplicate (user, movie) events are averaged into one cell; the
    /// number of merged duplicates is logged.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let user_ids: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movie_ids: Vec<MovieId> = ratings
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        // (sum, count) per cell
        let mut sums: HashMap<(usize, usize), (f32, u32)> = HashMap::new();
        for rating in ratings {
            let key = (user_index[&rating.user_id], movie_index[&rating.movie_id]);
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += rating.rating;
            entry.1 += 1;
        }

        let n_cols = movie_ids.len();
        let mut cells = vec![None; user_ids.len() * n_cols];
        let mut duplicates = 0u32;
        for ((row, col), (sum, count)) in sums {
            duplicates += count - 1;
            cells[row * n_cols + col] = Some(sum / count as f32);
        }

        if duplicates > 0 {
            warn!(
                "Averaged {} duplicate (user, movie) rating events",
                duplicates
            );
        }
        debug!(
            "Built user-item matrix: {} users x {} movies",
            user_ids.len(),
            movie_ids.len()
        );

        Self {
            user_ids,
            movie_ids,
            user_index,
            movie_index,
            cells,
        }
    }

    pub fn user_count(&self) -> usize {
        self.user_ids.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movie_ids.len()
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    pub fn user_row(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn movie_column(&self, movie_id: MovieId) -> Option<usize> {
        self.movie_index.get(&movie_id).copied()
    }

    /// Cell by matrix position
    pub fn cell(&self, row: usize, col: usize) -> Option<f32> {
        self.cells[row * self.movie_ids.len() + col]
    }

    /// Cell by ids; `None` for unrated or unknown ids
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f32> {
        let row = self.user_row(user_id)?;
        let col = self.movie_column(movie_id)?;
        self.cell(row, col)
    }

    /// Cells of one user row
    pub fn row(&self, row: usize) -> &[Option<f32>] {
        let n_cols = self.movie_ids.len();
        &self.cells[row * n_cols..(row + 1) * n_cols]
    }

    /// Subtract each user's mean rating from their rated cells.
    ///
    /// ## Algorithm
    /// - mean over rated cells only
    /// - rated cell -> rating - mean; unrated cell -> 0.0
    /// - a user with no rated cells gets a 0.0 offset
    pub fn normalize(&self) -> NormalizedRatings {
        let (rows, user_means): (Vec<Vec<f32>>, Vec<f32>) = (0..self.user_count())
            .into_par_iter()
            .map(|row| {
                let cells = self.row(row);
                let (sum, count) = cells
                    .iter()
                    .flatten()
                    .fold((0.0f32, 0u32), |(s, c), &r| (s + r, c + 1));
                let mean = if count > 0 { sum / count as f32 } else { 0.0 };

                let normalized: Vec<f32> = cells
                    .iter()
                    .map(|cell| cell.map_or(0.0, |r| r - mean))
                    .collect();
                (normalized, mean)
            })
            .unzip();

        NormalizedRatings { rows, user_means }
    }
}
