//! Generic CRUD over one REST collection.

use std::marker::PhantomData;

use reqwest::Method;

use super::{EnvelopeShape, ListParams, ListPayload, RestClient};
use crate::errors::SyncError;
use crate::models::Entity;

/// Typed handle on `/{collection}` for entity type `T`.
pub struct Resource<T> {
    client: RestClient,
    collection: &'static str,
    shape: EnvelopeShape,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection: self.collection,
            shape: self.shape,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Resource<T> {
    pub fn new(client: RestClient, collection: &'static str, shape: EnvelopeShape) -> Self {
        Self {
            client,
            collection,
            shape,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn shape(&self) -> EnvelopeShape {
        self.shape
    }

    pub(crate) fn client(&self) -> &RestClient {
        &self.client
    }

    pub(crate) fn collection_path(&self) -> String {
        format!("/{}", self.collection)
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.collection, id)
    }

    /// GET /{collection}
    pub async fn list(&self, params: &ListParams) -> Result<Vec<T>, SyncError> {
        let payload: ListPayload<T> = self
            .client
            .send::<(), _>(
                Method::GET,
                &self.collection_path(),
                &params.to_query(),
                None,
                self.shape,
            )
            .await?;
        Ok(payload.into_items())
    }

    /// POST /{collection}
    pub async fn create(&self, draft: &T::Draft) -> Result<T, SyncError> {
        self.client
            .send(
                Method::POST,
                &self.collection_path(),
                &[],
                Some(draft),
                self.shape,
            )
            .await
    }

    /// PUT /{collection}/{id}
    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<T, SyncError> {
        self.client
            .send(Method::PUT, &self.item_path(id), &[], Some(patch), self.shape)
            .await
    }

    /// DELETE /{collection}/{id}
    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        self.client
            .send_unit::<()>(Method::DELETE, &self.item_path(id), None, self.shape)
            .await
    }
}
