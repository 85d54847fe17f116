use super::*;
use crate::db::catalog::ProductRepository;
use crate::db::ledger::OrderRepository;
use crate::orders::committer::{OrderCommitter, OrderMeta};
use crate::orders::error::OrderError;
use crate::orders::validator::ValidatedItem;
use rust_decimal::Decimal;
use shared::models::AddressType;
use shared::order::OrderStatus;

#[tokio::test]
async fn commit_writes_order_and_debits_stock() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "19.99", 10).await;
    seed_product(&catalog, "WIDGET-2", "5.00", 10).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;
    let svc = service(&catalog, &ledger);

    let order = svc
        .create_order(
            &user("user-1"),
            crate::orders::OrderRequest {
                shipping_address_id: address.address_id.clone(),
                billing_address_id: address.address_id.clone(),
                items: vec![item("WIDGET-1", 2), item("WIDGET-2", 3)],
            },
        )
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    // 2 x 19.99 + 3 x 5.00
    assert_eq!(order.total_amount, "54.98".parse::<Decimal>().unwrap());
    assert_eq!(order.items[0].position, 0);
    assert_eq!(order.items[1].position, 1);

    let products = ProductRepository::new(catalog);
    assert_eq!(
        products.find_by_sku("WIDGET-1").await.unwrap().unwrap().stock_quantity,
        8
    );
    assert_eq!(
        products.find_by_sku("WIDGET-2").await.unwrap().unwrap().stock_quantity,
        7
    );

    let orders = OrderRepository::new(ledger);
    let stored = orders.find_by_id(&order.order_id).await.unwrap().unwrap();
    assert_eq!(stored.total_amount, order.total_amount);
    let movements = orders.stock_movements(&order.order_id).await.unwrap();
    assert_eq!(
        movements,
        vec![("WIDGET-1".to_string(), 2), ("WIDGET-2".to_string(), 3)]
    );
}

#[tokio::test]
async fn snapshot_price_survives_catalog_edits() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "19.99", 10).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;
    let svc = service(&catalog, &ledger);

    let order = svc
        .create_order(
            &user("user-1"),
            crate::orders::OrderRequest {
                shipping_address_id: address.address_id.clone(),
                billing_address_id: address.address_id,
                items: vec![item("WIDGET-1", 1)],
            },
        )
        .await
        .unwrap();

    // Reprice after the order is committed
    ProductRepository::new(catalog)
        .update(
            "WIDGET-1",
            shared::models::ProductUpdate {
                price: Some("29.99".parse().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = OrderRepository::new(ledger)
        .find_by_id(&order.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.items[0].snapshot.unit_price,
        "19.99".parse::<Decimal>().unwrap()
    );
    assert_eq!(stored.total_amount, "19.99".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn losing_the_stock_race_rolls_everything_back() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "10.00", 5).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;
    let svc = service(&catalog, &ledger);

    let request = crate::orders::OrderRequest {
        shipping_address_id: address.address_id.clone(),
        billing_address_id: address.address_id.clone(),
        items: vec![item("WIDGET-1", 4)],
    };

    // Both requests validate against stock 5; only one can win the
    // conditional decrement.
    svc.create_order(&user("user-1"), request.clone()).await.unwrap();
    let err = svc
        .create_order(&user("user-1"), request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::InsufficientStock { ref sku, available: 1 } if sku == "WIDGET-1"
    ));

    // Loser left no trace: one order in the ledger, stock at 1
    let orders = OrderRepository::new(ledger);
    assert_eq!(orders.find_for_user("user-1").await.unwrap().len(), 1);
    let product = ProductRepository::new(catalog)
        .find_by_sku("WIDGET-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 1);
}

#[tokio::test]
async fn mid_commit_failure_compensates_earlier_decrements() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "PLENTY", "10.00", 50).await;
    seed_product(&catalog, "SCARCE", "10.00", 2).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;

    let products = ProductRepository::new(catalog.clone());
    let orders = OrderRepository::new(ledger.clone());
    let committer = OrderCommitter::new(products.clone(), orders.clone());

    // Items validated against a stock level that no longer holds for
    // SCARCE, as if a competing order landed in between.
    let stale = vec![
        ValidatedItem {
            sku: "PLENTY".into(),
            name: "Product PLENTY".into(),
            unit_price: "10.00".parse().unwrap(),
            quantity: 10,
            stock_on_hand: 50,
        },
        ValidatedItem {
            sku: "SCARCE".into(),
            name: "Product SCARCE".into(),
            unit_price: "10.00".parse().unwrap(),
            quantity: 5,
            stock_on_hand: 5,
        },
    ];
    let err = committer
        .commit(
            OrderMeta {
                user_id: "user-1".into(),
                shipping_address_id: address.address_id.clone(),
                billing_address_id: address.address_id,
            },
            stale,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::InsufficientStock { ref sku, available: 2 } if sku == "SCARCE"
    ));

    // PLENTY's decrement was compensated and no order row survived
    assert_eq!(
        products.find_by_sku("PLENTY").await.unwrap().unwrap().stock_quantity,
        50
    );
    assert_eq!(
        products.find_by_sku("SCARCE").await.unwrap().unwrap().stock_quantity,
        2
    );
    assert!(orders.find_for_user("user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn movement_log_failure_restores_stock() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "10.00", 5).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;
    let svc = service(&catalog, &ledger);

    // Break the movement log so the write after the decrements fails
    sqlx::query("DROP TABLE stock_movements")
        .execute(&ledger)
        .await
        .unwrap();

    let err = svc
        .create_order(
            &user("user-1"),
            crate::orders::OrderRequest {
                shipping_address_id: address.address_id.clone(),
                billing_address_id: address.address_id,
                items: vec![item("WIDGET-1", 3)],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Store(_)));

    // No order row survived and the debited stock came back
    assert!(
        OrderRepository::new(ledger)
            .find_for_user("user-1")
            .await
            .unwrap()
            .is_empty()
    );
    let product = ProductRepository::new(catalog)
        .find_by_sku("WIDGET-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 5);
}

#[tokio::test]
async fn duplicate_sku_rolls_back_before_touching_stock() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "10.00", 5).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;

    let products = ProductRepository::new(catalog.clone());
    let orders = OrderRepository::new(ledger.clone());
    let committer = OrderCommitter::new(products.clone(), orders.clone());

    let twice = |quantity| ValidatedItem {
        sku: "WIDGET-1".into(),
        name: "Product WIDGET-1".into(),
        unit_price: "10.00".parse().unwrap(),
        quantity,
        stock_on_hand: 5,
    };
    let err = committer
        .commit(
            OrderMeta {
                user_id: "user-1".into(),
                shipping_address_id: address.address_id.clone(),
                billing_address_id: address.address_id,
            },
            vec![twice(1), twice(2)],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::DuplicateSku(ref sku) if sku == "WIDGET-1"));
    assert_eq!(
        products.find_by_sku("WIDGET-1").await.unwrap().unwrap().stock_quantity,
        5
    );
    assert!(orders.find_for_user("user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn exact_quantity_takes_stock_to_zero() {
    let (catalog, ledger) = stores().await;
    seed_product(&catalog, "WIDGET-1", "10.00", 3).await;
    let address = seed_address(&ledger, "user-1", AddressType::Both).await;
    let svc = service(&catalog, &ledger);

    svc.create_order(
        &user("user-1"),
        crate::orders::OrderRequest {
            shipping_address_id: address.address_id.clone(),
            billing_address_id: address.address_id,
            items: vec![item("WIDGET-1", 3)],
        },
    )
    .await
    .unwrap();

    let product = ProductRepository::new(catalog)
        .find_by_sku("WIDGET-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 0);
    assert!(!product.in_stock());
}
