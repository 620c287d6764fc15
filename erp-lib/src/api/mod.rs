//! API operations
//!
//! [`Backend`] is the seam host screens program against. [`ErpClient`](crate::ErpClient)
//! implements it over HTTP; tests implement it in memory.

mod execute;
mod query;

pub use query::*;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::model::{CollectionAction, ItemAction, ListResponse, Record, Resource};

/// Operations the ERP backend offers on its resources.
#[async_trait]
pub trait Backend: Send + Sync {
    /// List a collection.
    async fn list(&self, resource: Resource, query: &ListQuery) -> Result<ListResponse, Error>;

    /// Fetch one entity.
    async fn retrieve(&self, resource: Resource, id: &str) -> Result<Record, Error>;

    /// Create an entity and return it as stored.
    async fn create(&self, resource: Resource, record: &Record) -> Result<Record, Error>;

    /// Partially update an entity and return it as stored.
    async fn update(&self, resource: Resource, id: &str, record: &Record) -> Result<Record, Error>;

    async fn delete(&self, resource: Resource, id: &str) -> Result<(), Error>;

    /// Run an action on one entity. Returns the response body, if any.
    async fn action(
        &self,
        resource: Resource,
        id: &str,
        action: ItemAction,
        body: Option<&Record>,
    ) -> Result<Option<Value>, Error>;

    /// Run an action on a whole collection.
    ///
    /// A rejected `bulk-create` with itemized failures fails with
    /// [`Error::BulkCreate`].
    async fn collection_action(
        &self,
        resource: Resource,
        action: CollectionAction,
        records: &[Record],
    ) -> Result<Option<Value>, Error>;

    /// Create many entities at once.
    async fn bulk_create(&self, resource: Resource, records: &[Record]) -> Result<Option<Value>, Error> {
        self.collection_action(resource, CollectionAction::BulkCreate, records)
            .await
    }

    /// Save planning fields of many entities at once.
    async fn bulk_save(&self, resource: Resource, records: &[Record]) -> Result<Option<Value>, Error> {
        self.collection_action(resource, CollectionAction::PlanningBulkSave, records)
            .await
    }
}
