use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::pin::Pin;
use std::sync::Arc;

use futures_util::Future;

use crate::environment::types::{PhotoList, PhotoOrder};
use crate::environment::Environment;

/// One source of photo pages. The browse view swaps providers when the
/// user moves between the front page, a search and an owner's photos.
pub trait PhotoProvider: std::fmt::Debug + Send + Sync {
    fn identifier(&self) -> &str;
    /// Providers with a fixed server-side order ignore `order`.
    fn request(
        &self,
        page: i64,
        order: PhotoOrder,
    ) -> Pin<Box<dyn Future<Output = Result<PhotoList, String>> + Send>>;
}

/// The front page: everything, newest or most-voted first.
pub struct LatestPhotosProvider {
    environment: Environment,
}

impl LatestPhotosProvider {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl std::fmt::Debug for LatestPhotosProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestPhotosProvider").finish()
    }
}

impl PhotoProvider for LatestPhotosProvider {
    fn identifier(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn request(
        &self,
        page: i64,
        order: PhotoOrder,
    ) -> Pin<Box<dyn Future<Output = Result<PhotoList, String>> + Send>> {
        let api = self.environment.api.clone();
        Box::pin(async move { api.get_photos(page, order).await })
    }
}

pub struct SearchPhotosProvider {
    environment: Environment,
    query: String,
}

impl SearchPhotosProvider {
    pub fn new(environment: Environment, query: impl Into<String>) -> Self {
        Self {
            environment,
            query: query.into(),
        }
    }
}

impl std::fmt::Debug for SearchPhotosProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPhotosProvider")
            .field("query", &self.query)
            .finish()
    }
}

impl PhotoProvider for SearchPhotosProvider {
    fn identifier(&self) -> &str {
        &self.query
    }

    fn request(
        &self,
        page: i64,
        _order: PhotoOrder,
    ) -> Pin<Box<dyn Future<Output = Result<PhotoList, String>> + Send>> {
        let api = self.environment.api.clone();
        let query = self.query.clone();
        Box::pin(async move { api.search_photos(query, page).await })
    }
}

pub struct OwnerPhotosProvider {
    environment: Environment,
    owner_id: i64,
}

impl OwnerPhotosProvider {
    pub fn new(environment: Environment, owner_id: i64) -> Self {
        Self {
            environment,
            owner_id,
        }
    }
}

impl std::fmt::Debug for OwnerPhotosProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerPhotosProvider")
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl PhotoProvider for OwnerPhotosProvider {
    fn identifier(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn request(
        &self,
        page: i64,
        _order: PhotoOrder,
    ) -> Pin<Box<dyn Future<Output = Result<PhotoList, String>> + Send>> {
        let api = self.environment.api.clone();
        let owner_id = self.owner_id;
        Box::pin(async move { api.photos_by_owner(owner_id, page).await })
    }
}

// Wraps a PhotoProvider so slice state can hold and compare providers.
#[derive(Clone)]
pub struct AnyPhotoProvider {
    provider: Arc<dyn PhotoProvider>,
    equatable: u64,
}

impl AnyPhotoProvider {
    pub fn new<T: Hash>(provider: impl PhotoProvider + 'static, id: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let equatable = hasher.finish();
        Self {
            provider: Arc::new(provider),
            equatable,
        }
    }
}

impl PartialEq for AnyPhotoProvider {
    /// The hash is fixed at construction, so equality is just the hash.
    fn eq(&self, other: &Self) -> bool {
        self.equatable == other.equatable
    }
}

impl Eq for AnyPhotoProvider {}

impl std::fmt::Debug for AnyPhotoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyPhotoProvider")
            .field("provider", &self.provider)
            .field("eq", &self.equatable)
            .finish()
    }
}

impl std::ops::Deref for AnyPhotoProvider {
    type Target = Arc<dyn PhotoProvider>;

    fn deref(&self) -> &Self::Target {
        &self.provider
    }
}
