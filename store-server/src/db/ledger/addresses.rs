//! Address repository
//!
//! Addresses belong to exactly one user and carry a type tag restricting
//! which order roles they may fill. Ownership checks happen in the
//! service layer; the repository only answers queries.

use crate::db::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use shared::models::{Address, AddressCreate, AddressUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: String,
    user_id: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    address_type: String,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AddressRow> for Address {
    type Error = RepoError;

    fn try_from(row: AddressRow) -> Result<Self, Self::Error> {
        let address_type = row
            .address_type
            .parse()
            .map_err(|e: String| RepoError::Database(e))?;
        Ok(Address {
            address_id: row.id,
            user_id: row.user_id,
            street: row.street,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            address_type,
            is_default: row.is_default,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct AddressRepository {
    pool: SqlitePool,
}

impl AddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an address for a user
    ///
    /// Marking the new address as default clears the default flag on the
    /// user's other addresses, in the same transaction.
    pub async fn create(&self, user_id: &str, data: AddressCreate) -> RepoResult<Address> {
        for (field, value) in [
            ("street", &data.street),
            ("city", &data.city),
            ("zip_code", &data.zip_code),
            ("country", &data.country),
        ] {
            if value.trim().is_empty() {
                return Err(RepoError::Validation(format!("{field} cannot be empty")));
            }
        }

        let address = Address {
            address_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            street: data.street,
            city: data.city,
            state: data.state,
            zip_code: data.zip_code,
            country: data.country,
            address_type: data.address_type,
            is_default: data.is_default,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;
        if address.is_default {
            sqlx::query("UPDATE addresses SET is_default = 0 WHERE user_id = ?")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(
            "INSERT INTO addresses \
             (id, user_id, street, city, state, zip_code, country, address_type, is_default, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&address.address_id)
        .bind(&address.user_id)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .bind(&address.country)
        .bind(address.address_type.as_str())
        .bind(address.is_default)
        .bind(address.created_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(address)
    }

    pub async fn find_by_id(&self, address_id: &str) -> RepoResult<Option<Address>> {
        let row: Option<AddressRow> = sqlx::query_as("SELECT * FROM addresses WHERE id = ?")
            .bind(address_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Address::try_from).transpose()
    }

    pub async fn get_by_id(&self, address_id: &str) -> RepoResult<Address> {
        self.find_by_id(address_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {address_id}")))
    }

    /// All addresses of a user, default first, then newest first
    pub async fn find_for_user(&self, user_id: &str) -> RepoResult<Vec<Address>> {
        let rows: Vec<AddressRow> = sqlx::query_as(
            "SELECT * FROM addresses WHERE user_id = ? \
             ORDER BY is_default DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Address::try_from).collect()
    }

    pub async fn update(&self, address_id: &str, data: AddressUpdate) -> RepoResult<Address> {
        let mut address = self.get_by_id(address_id).await?;

        if let Some(street) = data.street {
            address.street = street;
        }
        if let Some(city) = data.city {
            address.city = city;
        }
        if let Some(state) = data.state {
            address.state = state;
        }
        if let Some(zip_code) = data.zip_code {
            address.zip_code = zip_code;
        }
        if let Some(country) = data.country {
            address.country = country;
        }
        if let Some(address_type) = data.address_type {
            address.address_type = address_type;
        }
        if let Some(is_default) = data.is_default {
            address.is_default = is_default;
        }

        let mut tx = self.pool.begin().await?;
        if address.is_default {
            sqlx::query("UPDATE addresses SET is_default = 0 WHERE user_id = ? AND id != ?")
                .bind(&address.user_id)
                .bind(address_id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(
            "UPDATE addresses SET \
             street = ?, city = ?, state = ?, zip_code = ?, country = ?, \
             address_type = ?, is_default = ? \
             WHERE id = ?",
        )
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .bind(&address.country)
        .bind(address.address_type.as_str())
        .bind(address.is_default)
        .bind(address_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(address)
    }

    pub async fn delete(&self, address_id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(address_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Address {address_id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ledger::open_in_memory;
    use shared::models::AddressType;

    fn home(address_type: AddressType, is_default: bool) -> AddressCreate {
        AddressCreate {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            country: "US".into(),
            address_type,
            is_default,
        }
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let pool = open_in_memory().await.unwrap();
        let repo = AddressRepository::new(pool);

        let created = repo.create("user-1", home(AddressType::Both, true)).await.unwrap();
        let found = repo.get_by_id(&created.address_id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn new_default_clears_previous_default() {
        let pool = open_in_memory().await.unwrap();
        let repo = AddressRepository::new(pool);

        let first = repo.create("user-1", home(AddressType::Both, true)).await.unwrap();
        let second = repo
            .create("user-1", home(AddressType::Shipping, true))
            .await
            .unwrap();

        let all = repo.find_for_user("user-1").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].address_id, second.address_id);
        assert!(all[0].is_default);
        let first_again = repo.get_by_id(&first.address_id).await.unwrap();
        assert!(!first_again.is_default);
    }

    #[tokio::test]
    async fn update_changes_type_tag() {
        let pool = open_in_memory().await.unwrap();
        let repo = AddressRepository::new(pool);

        let created = repo
            .create("user-1", home(AddressType::Shipping, false))
            .await
            .unwrap();
        let updated = repo
            .update(
                &created.address_id,
                AddressUpdate {
                    address_type: Some(AddressType::Billing),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address_type, AddressType::Billing);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = open_in_memory().await.unwrap();
        let repo = AddressRepository::new(pool);
        assert!(matches!(
            repo.delete("nope").await.unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
