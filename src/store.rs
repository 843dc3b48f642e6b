//! In-memory movie store.
//!
//! Records live in one ordered `Vec`. New records go to the back and every
//! lookup scans from the front, so when two records share an id the older
//! one wins. Nothing is persisted; the catalogue resets on restart.
//!
//! A single [`Mutex`] guards the whole sequence. Reads take it too: an update
//! or delete changes the shape of the `Vec`, which would invalidate any scan
//! running alongside it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::{Director, Movie};

/// Store handle shared by every request handler.
pub type SharedStore = Arc<dyn Store>;

/// Identifier-keyed CRUD over movie records.
pub trait Store: Send + Sync {
    /// Every record, in insertion order.
    fn list(&self) -> Vec<Movie>;

    /// The first record whose id equals `id`.
    fn get(&self, id: &str) -> Option<Movie>;

    /// Appends `movie` unchanged, even if its id is empty or already taken.
    fn create(&self, movie: Movie) -> Movie;

    /// Overwrites title, isbn and director of the first record matching `id`.
    ///
    /// The stored id is kept even if `patch.id` differs. On a hit the patch
    /// itself is returned, not the stored record.
    fn update(&self, id: &str, patch: Movie) -> Option<Movie>;

    /// Removes and returns the first record matching `id`.
    fn delete(&self, id: &str) -> Option<Movie>;

    /// Number of records currently held.
    fn count(&self) -> usize;
}

/// The process-wide [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
}

impl MemoryStore {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies: Mutex::new(movies) }
    }

    /// The catalogue the service starts with: Inception, then RRR.
    pub fn seeded() -> Self {
        let store = Self::new(vec![Movie::new(
            "1",
            "12345",
            "Inception",
            Some(Director::new("Christopher", "Nolan")),
        )]);
        store.create(Movie::new("2", "2", "RRR", Some(Director::new("Rajamouli", "SS"))));
        store
    }

    /// Every operation leaves the `Vec` consistent before it can panic, so a
    /// poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<Movie>> {
        self.movies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn list(&self) -> Vec<Movie> {
        self.lock().clone()
    }

    fn get(&self, id: &str) -> Option<Movie> {
        self.lock().iter().find(|m| m.id == id).cloned()
    }

    fn create(&self, movie: Movie) -> Movie {
        self.lock().push(movie.clone());
        movie
    }

    fn update(&self, id: &str, patch: Movie) -> Option<Movie> {
        let mut movies = self.lock();
        let stored = movies.iter_mut().find(|m| m.id == id)?;
        stored.title.clone_from(&patch.title);
        stored.isbn.clone_from(&patch.isbn);
        stored.director.clone_from(&patch.director);
        Some(patch)
    }

    fn delete(&self, id: &str) -> Option<Movie> {
        let mut movies = self.lock();
        let idx = movies.iter().position(|m| m.id == id)?;
        Some(movies.remove(idx))
    }

    fn count(&self) -> usize {
        self.lock().len()
    }
}
