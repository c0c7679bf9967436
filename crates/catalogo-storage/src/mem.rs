use crate::traits::UserStore;
use catalogo_core::{InsertAck, Result, StoredUser, UserRecord};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Vec<StoredUser>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replay(&self, doc: StoredUser) {
        self.inner.write().push(doc);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, user: UserRecord) -> Result<InsertAck> {
        let doc = StoredUser::new(user);
        let ack = InsertAck::for_user(&doc);
        self.inner.write().push(doc);
        Ok(ack)
    }

    async fn all(&self) -> Result<Vec<StoredUser>> {
        Ok(self.inner.read().clone())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn duplicate_submissions_create_distinct_documents() {
        let store = InMemoryStore::new();
        let user = UserRecord {
            email: Some(json!("ana@example.com")),
            ..Default::default()
        };
        let a = store.insert(user.clone()).await.unwrap();
        let b = store.insert(user).await.unwrap();
        assert!(a.acknowledged && b.acknowledged);
        assert_ne!(a.inserted_id, b.inserted_id);
        let docs = store.all().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, a.inserted_id);
    }
}
