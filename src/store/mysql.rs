use diesel::{
    dsl::sql,
    prelude::*,
    sql_types::{Bigint, Unsigned},
};
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncMysqlConnection, RunQueryDsl,
};
use tracing::{debug, info};

use crate::model::{
    schema::{self, message::dsl},
    Message, NewMessage,
};

use super::{MessageStore, StoreError};

#[derive(Clone)]
pub struct MysqlStore {
    db: Pool<AsyncMysqlConnection>,
}

impl MysqlStore {
    /// Builds the pool without opening a connection; the first checkout
    /// (normally [`MessageStore::ensure_schema`]) is what reaches the server.
    pub fn new(url: impl Into<String>) -> Result<Self, StoreError> {
        let manager = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(url);
        let db = Pool::builder(manager).build()?;

        Ok(Self { db })
    }
}

impl MessageStore for MysqlStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut db = self.db.get().await?;

        diesel::sql_query(schema::CREATE_MESSAGE_TABLE)
            .execute(&mut db)
            .await?;

        info!("message table ready");
        Ok(())
    }

    async fn insert(&self, message: NewMessage) -> Result<Message, StoreError> {
        // LAST_INSERT_ID() is per connection, so both statements must share one.
        let mut db = self.db.get().await?;

        diesel::insert_into(dsl::message)
            .values(&message)
            .execute(&mut db)
            .await?;

        let id = diesel::select(sql::<Unsigned<Bigint>>("LAST_INSERT_ID()"))
            .get_result::<u64>(&mut db)
            .await?;

        debug!(id, "inserted message");
        Ok(Message {
            id,
            content: message.into_content(),
        })
    }

    async fn find(&self, id: u64) -> Result<Option<Message>, StoreError> {
        let mut db = self.db.get().await?;

        let message = dsl::message
            .find(id)
            .select(Message::as_select())
            .first(&mut db)
            .await
            .optional()?;

        Ok(message)
    }
}
