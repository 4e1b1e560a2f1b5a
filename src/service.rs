//! Generic CRUD service shared by every resource.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::DeskClient;
use crate::error::{DeskError, Result};
use crate::path::PathHandler;
use crate::traits::{Create, Get, List, Update};

/// Get/list/create/update for one resource.
///
/// `T` is the singular envelope (e.g. `{"ticket": {...}, "included": {...}}`)
/// and `L` the collection envelope. Every call goes through the client's
/// middleware chain.
pub struct Service<T, L> {
    client: DeskClient,
    paths: PathHandler,
    _envelopes: PhantomData<fn() -> (T, L)>,
}

impl<T, L> Service<T, L> {
    pub fn new(client: DeskClient, paths: PathHandler) -> Self {
        Self {
            client,
            paths,
            _envelopes: PhantomData,
        }
    }

    pub fn paths(&self) -> &PathHandler {
        &self.paths
    }

    pub fn client(&self) -> &DeskClient {
        &self.client
    }
}

impl<T, L> Clone for Service<T, L> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone(), self.paths.clone())
    }
}

impl<T, L> fmt::Debug for Service<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("resource", &self.paths.base())
            .finish_non_exhaustive()
    }
}

/// Query requesting every side-loaded relation.
#[derive(Serialize)]
struct IncludeAll {
    includes: &'static str,
}

const INCLUDE_ALL: IncludeAll = IncludeAll { includes: "all" };

fn encode<T: Serialize + ?Sized>(entity: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(entity).map_err(|e| {
        tracing::error!(error = %e, "failed to marshal request body");
        DeskError::Serialize(e)
    })
}

#[async_trait]
impl<T, L> Get for Service<T, L>
where
    T: DeserializeOwned + Send + 'static,
    L: Send + 'static,
{
    type Entity = T;

    #[tracing::instrument(skip(self), fields(resource = self.paths.base()))]
    async fn get(&self, id: u64) -> Result<T> {
        let url = self.client.endpoint(&self.paths.get(id), Some(&INCLUDE_ALL))?;
        let request = self.client.request(Method::GET, url, None);
        self.client.exchange(request, 200).await
    }
}

#[async_trait]
impl<T, L> List for Service<T, L>
where
    T: Send + 'static,
    L: DeserializeOwned + Send + 'static,
{
    type Page = L;

    #[tracing::instrument(skip(self, query), fields(resource = self.paths.base()))]
    async fn list<Q>(&self, query: &Q) -> Result<L>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let url = self.client.endpoint(&self.paths.list(), Some(query))?;
        let request = self.client.request(Method::GET, url, None);
        self.client.exchange(request, 200).await
    }
}

#[async_trait]
impl<T, L> Create for Service<T, L>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    L: Send + 'static,
{
    type Entity = T;

    #[tracing::instrument(skip(self, entity), fields(resource = self.paths.base()))]
    async fn create(&self, entity: &T) -> Result<T> {
        let body = encode(entity)?;
        let url = self.client.endpoint::<()>(&self.paths.create(), None)?;
        let request = self.client.request(Method::POST, url, Some(body));
        self.client.exchange(request, 201).await
    }
}

#[async_trait]
impl<T, L> Update for Service<T, L>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    L: Send + 'static,
{
    type Entity = T;

    #[tracing::instrument(skip(self, entity), fields(resource = self.paths.base()))]
    async fn update(&self, id: u64, entity: &T) -> Result<T> {
        let body = encode(entity)?;
        let url = self.client.endpoint::<()>(&self.paths.update(id), None)?;
        let request = self.client.request(Method::PUT, url, Some(body));
        self.client.exchange(request, 200).await
    }
}
