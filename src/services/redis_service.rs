use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::models::User;

/// Account store. Users live at `user:{id}` as JSON; the unique name
/// and email each get an index key pointing back at the id.
pub struct RedisService {
    client: Arc<Client>,
}

impl RedisService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let user_data: Option<String> = conn.get(format!("user:{}", id)).await?;
        user_data.map(|data| parse_user(&data)).transpose()
    }

    pub async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let id: Option<String> = conn.get(format!("user_name:{}", name)).await?;
        match id {
            Some(id) => self.get_user_by_id(&id).await,
            None => Ok(None),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let id: Option<String> = conn.get(format!("user_email:{}", email)).await?;
        match id {
            Some(id) => self.get_user_by_id(&id).await,
            None => Ok(None),
        }
    }

    /// First write of a new account: the record plus both index keys.
    pub async fn create_user(&self, user: &User) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(
            format!("user:{}", user.id),
            serde_json::to_string(user).unwrap(),
        )
        .await?;
        conn.set::<_, _, ()>(format!("user_name:{}", user.name), user.id.clone())
            .await?;
        conn.set(format!("user_email:{}", user.email), user.id.clone())
            .await
    }

    /// Rewrites an existing record in place. Name and email never
    /// change after registration, so the index keys stay as they are.
    pub async fn save_user(&self, user: &User) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set(
            format!("user:{}", user.id),
            serde_json::to_string(user).unwrap(),
        )
        .await
    }
}

fn parse_user(data: &str) -> Result<User, redis::RedisError> {
    serde_json::from_str(data).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to parse user record",
            e.to_string(),
        ))
    })
}

impl Clone for RedisService {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
