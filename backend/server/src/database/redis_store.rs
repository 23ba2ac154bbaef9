//! # Redis
//!
//! Persistent store for listings.
//!
//! ## Implementation
//!
//! - Document: redis hash `<collection>:<id>`, one hash field per document field, values JSON encoded
//! - Collection: redis set `<collection>` holding every id
//! - Partial updates `HSET` only the changed fields, so concurrent admin writes to different
//!   fields both land and writes to the same field are last write wins
//! - The existence check and the `HSET` run as one script. An update racing a delete cannot
//!   bring back a hash whose id already left the collection set
//! - Queries load the whole collection in one pipeline and filter in process. Fine for a
//!   directory of a few thousand rows
use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use serde_json::Value;
use uuid::Uuid;

use super::{Document, Fields, Store, StoreError};

const UPDATE_IF_EXISTS: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return 0
end
if #ARGV > 0 then
    redis.call('HSET', KEYS[1], unpack(ARGV))
end
return 1
";

pub struct RedisStore {
    connection: ConnectionManager,
    update_if_exists: Script,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(100));

        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager_with_config(config).await?;

        Ok(Self {
            connection,
            update_if_exists: Script::new(UPDATE_IF_EXISTS),
        })
    }
}

fn document_key(collection: &str, id: &str) -> String {
    format!("{collection}:{id}")
}

fn encode(fields: Fields) -> Result<Vec<(String, String)>, StoreError> {
    fields
        .into_iter()
        .map(|(field, value)| Ok((field, serde_json::to_string(&value)?)))
        .collect()
}

fn decode(id: &str, raw: HashMap<String, String>) -> Result<Option<Document>, StoreError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let fields = raw
        .into_iter()
        .map(|(field, value)| Ok((field, serde_json::from_str::<Value>(&value)?)))
        .collect::<Result<Fields, StoreError>>()?;

    Ok(Some(Document {
        id: id.to_string(),
        fields,
    }))
}

#[async_trait]
impl Store for RedisStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut connection = self.connection.clone();

        let mut pipe = redis::pipe();
        pipe.atomic();
        let encoded = encode(fields)?;
        if !encoded.is_empty() {
            pipe.hset_multiple(document_key(collection, &id), encoded.as_slice())
                .ignore();
        }
        pipe.sadd(collection, &id).ignore();

        let _: () = pipe.query_async(&mut connection).await?;

        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut connection = self.connection.clone();
        let raw: HashMap<String, String> =
            connection.hgetall(document_key(collection, id)).await?;

        decode(id, raw)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut connection = self.connection.clone();
        let ids: Vec<String> = connection.smembers(collection).await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for id in &ids {
            pipe.hgetall(document_key(collection, id));
        }
        let raws: Vec<HashMap<String, String>> = pipe.query_async(&mut connection).await?;

        let mut documents = Vec::with_capacity(ids.len());
        for (id, raw) in ids.iter().zip(raws) {
            if let Some(document) = decode(id, raw)? {
                documents.push(document);
            }
        }

        Ok(documents)
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        let mut invocation = self.update_if_exists.key(document_key(collection, id));
        for (field, value) in encode(patch)? {
            invocation.arg(field).arg(value);
        }

        let updated: bool = invocation.invoke_async(&mut connection).await?;
        if !updated {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        let _: () = redis::pipe()
            .atomic()
            .del(document_key(collection, id))
            .ignore()
            .srem(collection, id)
            .ignore()
            .query_async(&mut connection)
            .await?;

        Ok(())
    }
}
