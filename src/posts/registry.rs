use std::ops::Range;
use std::sync::{Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{Post, PostInput, RegistryError};
use crate::health::Ready;

/// Ids for new posts are drawn uniformly from this range.
pub const ID_RANGE: Range<i64> = 0..1_000_000;

/// Redraws allowed when a drawn id is already taken.
const MAX_ID_ATTEMPTS: usize = 64;

/// In-memory, insertion-ordered store of posts.
///
/// One mutex guards both the posts and the id generator, so every operation
/// sees and leaves a consistent collection. Lookups are linear scans; the
/// collection is expected to stay small.
pub struct PostRegistry {
    inner: Mutex<Inner>,
}

struct Inner {
    posts: Vec<Post>,
    rng: StdRng,
    ids: Range<i64>,
}

impl PostRegistry {
    /// A registry holding `posts` in order, drawing new ids from `rng`.
    pub fn new(posts: Vec<Post>, rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(Inner { posts, rng, ids: ID_RANGE }),
        }
    }

    #[cfg(test)]
    fn with_id_range(posts: Vec<Post>, rng: StdRng, ids: Range<i64>) -> Self {
        Self {
            inner: Mutex::new(Inner { posts, rng, ids }),
        }
    }

    /// An empty registry with an entropy-seeded id generator.
    pub fn empty() -> Self {
        Self::new(Vec::new(), StdRng::from_entropy())
    }

    /// The registry the service starts with: the two seed posts, ids 1 and 2.
    pub fn with_seed_posts(rng: StdRng) -> Self {
        Self::new(seed_posts(), rng)
    }

    /// Snapshot of every post in insertion order.
    pub fn list(&self) -> Result<Vec<Post>, RegistryError> {
        Ok(self.lock()?.posts.clone())
    }

    /// Stores `input` under a fresh id and returns the stored post.
    pub fn create(&self, input: PostInput) -> Result<Post, RegistryError> {
        let mut inner = self.lock()?;
        let id = inner.fresh_id()?;
        let post = input.into_post(id);
        inner.posts.push(post.clone());
        debug!(id, "post created");
        Ok(post)
    }

    pub fn get(&self, id: i64) -> Result<Post, RegistryError> {
        let inner = self.lock()?;
        let idx = inner.position(id)?;
        Ok(inner.posts[idx].clone())
    }

    /// Replaces every field of post `id` with `input`, keeping the id and the
    /// post's position.
    pub fn update(&self, id: i64, input: PostInput) -> Result<Post, RegistryError> {
        let mut inner = self.lock()?;
        let idx = inner.position(id)?;
        let post = input.into_post(id);
        inner.posts[idx] = post.clone();
        debug!(id, "post updated");
        Ok(post)
    }

    /// Removes post `id`; later posts shift down one position.
    pub fn delete(&self, id: i64) -> Result<Post, RegistryError> {
        let mut inner = self.lock()?;
        let idx = inner.position(id)?;
        let post = inner.posts.remove(idx);
        debug!(id, "post deleted");
        Ok(post)
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.posts.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, RegistryError> {
        self.inner.lock().map_err(|_| RegistryError::Poisoned)
    }
}

impl Ready for PostRegistry {
    fn is_ready(&self) -> bool {
        !self.inner.is_poisoned()
    }
}

impl Inner {
    fn position(&self, id: i64) -> Result<usize, RegistryError> {
        self.posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    fn fresh_id(&mut self) -> Result<i64, RegistryError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.rng.gen_range(self.ids.clone());
            if self.posts.iter().all(|p| p.id != id) {
                return Ok(id);
            }
            debug!(id, "drawn post id already taken, redrawing");
        }
        Err(RegistryError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }
}

/// The two posts every fresh service starts with.
pub fn seed_posts() -> Vec<Post> {
    (1..=2)
        .map(|n| Post {
            id: n,
            title: format!("title of post {n}"),
            content: format!("content of post {n}"),
            published: true,
            rating: None,
        })
        .collect()
}
