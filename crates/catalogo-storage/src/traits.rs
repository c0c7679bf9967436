use catalogo_core::{CatalogError, InsertAck, Result, StoredUser, UserRecord};

/// Document store for registered users.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Inserts one document. Duplicates are not detected.
    async fn insert(&self, user: UserRecord) -> Result<InsertAck>;

    // Export all documents, oldest first
    async fn all(&self) -> Result<Vec<StoredUser>>;

    fn kind(&self) -> &'static str;
}

/// Stands in for a store that failed to open at startup; every call fails.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for UnavailableStore {
    async fn insert(&self, _user: UserRecord) -> Result<InsertAck> {
        Err(CatalogError::Store(format!("store unavailable: {}", self.reason)))
    }

    async fn all(&self) -> Result<Vec<StoredUser>> {
        Err(CatalogError::Store(format!("store unavailable: {}", self.reason)))
    }

    fn kind(&self) -> &'static str {
        "unavailable"
    }
}
