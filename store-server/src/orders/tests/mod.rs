//! Order pipeline tests against in-memory stores

mod test_commit;

use crate::db::catalog::{self, ProductRepository};
use crate::db::ledger::{self, AddressRepository};
use crate::orders::{ItemRequest, OrderService, RequestUser};
use shared::models::{Address, AddressCreate, AddressType, Product, ProductCreate};
use sqlx::SqlitePool;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn stores() -> (Surreal<Db>, SqlitePool) {
    let catalog = catalog::open_in_memory().await.unwrap();
    let ledger = ledger::open_in_memory().await.unwrap();
    (catalog, ledger)
}

fn service(catalog: &Surreal<Db>, ledger: &SqlitePool) -> OrderService {
    OrderService::new(catalog.clone(), ledger.clone())
}

async fn seed_product(catalog: &Surreal<Db>, sku: &str, price: &str, stock: i64) -> Product {
    ProductRepository::new(catalog.clone())
        .create(ProductCreate {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            description: None,
            price: price.parse().unwrap(),
            stock_quantity: stock,
            is_active: Some(true),
            categories: None,
        })
        .await
        .unwrap()
}

async fn seed_inactive_product(catalog: &Surreal<Db>, sku: &str) -> Product {
    ProductRepository::new(catalog.clone())
        .create(ProductCreate {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            description: None,
            price: "5.00".parse().unwrap(),
            stock_quantity: 100,
            is_active: Some(false),
            categories: None,
        })
        .await
        .unwrap()
}

async fn seed_address(ledger: &SqlitePool, user_id: &str, address_type: AddressType) -> Address {
    AddressRepository::new(ledger.clone())
        .create(
            user_id,
            AddressCreate {
                street: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                zip_code: "62701".into(),
                country: "US".into(),
                address_type,
                is_default: false,
            },
        )
        .await
        .unwrap()
}

fn user(id: &str) -> RequestUser {
    RequestUser {
        id: id.to_string(),
        is_admin: false,
    }
}

fn admin() -> RequestUser {
    RequestUser {
        id: "admin-1".to_string(),
        is_admin: true,
    }
}

fn item(sku: &str, quantity: i64) -> ItemRequest {
    ItemRequest {
        product_sku: sku.to_string(),
        quantity,
    }
}
