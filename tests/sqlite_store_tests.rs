// tests/sqlite_store_tests.rs
use nexus_inventory::application::{
    commands::catalog::{CreateComponentCommand, CreateComponentStockCommand, UpdateProductCommand},
    error::ApplicationError,
    queries::catalog::{ListFacilitiesQuery, ListProductsQuery},
};
use nexus_inventory::domain::{
    audit::{AuditLogFilter, AuditLogRepository, AuditOperation, SortOrder},
    errors::DomainError,
    schema::EntityKind,
};
use nexus_inventory::infrastructure::repositories::SqliteAuditLogRepository;

mod support;

use support::{ProductBuilder, facility_command, sqlite_services};

#[tokio::test]
async fn product_lifecycle_is_audited_in_sqlite() {
    let (services, pool) = sqlite_services().await;
    let commands = &services.catalog_commands;

    let product = commands
        .create_product(ProductBuilder::new().price(10.0).build())
        .await
        .unwrap();
    let updated = commands
        .update_product(
            product.id,
            UpdateProductCommand {
                price: Some(12.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 12.0);
    commands.delete_product(product.id).await.unwrap();

    let repo = SqliteAuditLogRepository::new(pool);
    let (records, next) = repo
        .list(
            &AuditLogFilter::for_object(EntityKind::Product, product.id),
            SortOrder::Asc,
            10,
            None,
        )
        .await
        .unwrap();
    assert!(next.is_none());
    let operations: Vec<_> = records.iter().map(|r| r.operation()).collect();
    assert_eq!(
        operations,
        vec![
            AuditOperation::Insert,
            AuditOperation::Update,
            AuditOperation::Delete
        ]
    );
    assert_eq!(
        records[1].description(),
        "price changed from 10.0 to 12.0"
    );
    assert!(records[2].description().contains("category was 'Laptops'"));
}

#[tokio::test]
async fn missing_audit_table_fails_the_update_and_keeps_the_row() {
    let (services, pool) = sqlite_services().await;
    let commands = &services.catalog_commands;
    let product = commands
        .create_product(ProductBuilder::new().price(100.0).build())
        .await
        .unwrap();

    sqlx::query("DROP TABLE audit_records")
        .execute(&pool)
        .await
        .unwrap();

    let err = commands
        .update_product(
            product.id,
            UpdateProductCommand {
                price: Some(120.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Persistence(_))
    ));

    let current = services
        .catalog_queries
        .get_product(product.id)
        .await
        .unwrap();
    assert_eq!(current.price, 100.0);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let (services, _pool) = sqlite_services().await;
    let commands = &services.catalog_commands;
    commands
        .create_user(support::user_command("taken"))
        .await
        .unwrap();

    let err = commands
        .create_user(support::user_command("taken"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn stock_referencing_missing_rows_is_rejected() {
    let (services, _pool) = sqlite_services().await;
    let err = services
        .catalog_commands
        .create_component_stock(CreateComponentStockCommand {
            component_id: 41,
            production_facility_id: 42,
            count: 1,
            updated_by: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn facility_inventory_joins_catalog_rows_and_cascades() {
    let (services, pool) = sqlite_services().await;
    let commands = &services.catalog_commands;
    let facility = commands
        .create_facility(support::facility_command("Plant S"))
        .await
        .unwrap();
    let component = commands
        .create_component(CreateComponentCommand {
            name: Some("Fan".into()),
            brand: Some("Noctua".into()),
            price: Some(19.5),
            ..Default::default()
        })
        .await
        .unwrap();
    let stock = commands
        .create_component_stock(CreateComponentStockCommand {
            component_id: component.id,
            production_facility_id: facility.id,
            count: 12,
            updated_by: None,
        })
        .await
        .unwrap();

    let inventory = services
        .catalog_queries
        .facility_inventory(facility.id)
        .await
        .unwrap();
    assert_eq!(inventory.components.len(), 1);
    assert_eq!(inventory.components[0].id, stock.id);
    assert_eq!(
        inventory.components[0]
            .component
            .as_ref()
            .and_then(|c| c.name.as_deref()),
        Some("Fan")
    );

    commands.delete_component(component.id).await.unwrap();
    let inventory = services
        .catalog_queries
        .facility_inventory(facility.id)
        .await
        .unwrap();
    assert!(inventory.components.is_empty());

    let repo = SqliteAuditLogRepository::new(pool);
    let (deletes, _) = repo
        .list(
            &AuditLogFilter {
                operation: Some(AuditOperation::Delete),
                ..AuditLogFilter::default()
            },
            SortOrder::Asc,
            10,
            None,
        )
        .await
        .unwrap();
    let kinds: Vec<_> = deletes.iter().map(|r| r.entity_type()).collect();
    assert_eq!(
        kinds,
        vec![EntityKind::ComponentInventory, EntityKind::Component]
    );
}

#[tokio::test]
async fn audit_pages_follow_the_cursor() {
    let (services, pool) = sqlite_services().await;
    for price in [1.0, 2.0, 3.0, 4.0, 5.0] {
        services
            .catalog_commands
            .create_product(ProductBuilder::new().price(price).build())
            .await
            .unwrap();
    }

    let repo = SqliteAuditLogRepository::new(pool);
    let filter = AuditLogFilter::default();
    let (first, cursor) = repo.list(&filter, SortOrder::Desc, 2, None).await.unwrap();
    let cursor = cursor.expect("more pages");
    let cursor = nexus_inventory::domain::audit::AuditLogCursor::decode(&cursor).unwrap();
    let (second, _) = repo
        .list(&filter, SortOrder::Desc, 2, Some(cursor))
        .await
        .unwrap();

    let first_ids: Vec<_> = first.iter().map(|r| r.id()).collect();
    let second_ids: Vec<_> = second.iter().map(|r| r.id()).collect();
    assert_eq!(first_ids.len(), 2);
    assert_eq!(second_ids.len(), 2);
    assert!(first_ids.iter().all(|id| second_ids.iter().all(|other| other < id)));

    let found = repo.find_by_id(first_ids[0]).await.unwrap().unwrap();
    assert_eq!(found.operation(), AuditOperation::Insert);
    assert!(repo.find_by_id(9_999).await.unwrap().is_none());
}

#[tokio::test]
async fn catalog_listing_filters_searches_and_orders_in_sql() {
    let (services, _pool) = sqlite_services().await;
    let commands = &services.catalog_commands;
    for (brand, model) in [("Acme", "Falcon"), ("Acme", "50%_Off"), ("Zenith", "Falcon Mini")] {
        commands
            .create_product(ProductBuilder::new().brand(brand).model(model).build())
            .await
            .unwrap();
    }

    let queries = &services.catalog_queries;
    let models = |items: Vec<nexus_inventory::application::dto::ProductDto>| -> Vec<String> {
        items.into_iter().filter_map(|p| p.model).collect()
    };
    let found = queries
        .list_products(ListProductsQuery {
            q: Some("falcon".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(models(found), vec!["Falcon", "Falcon Mini"]);

    // LIKE wildcards in the search text are matched literally
    let found = queries
        .list_products(ListProductsQuery {
            q: Some("%_".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(models(found), vec!["50%_Off"]);

    let found = queries
        .list_products(ListProductsQuery {
            brand: Some("Acme".into()),
            available: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let mut closed = facility_command("Closed Mill");
    closed.is_operating = Some(false);
    commands.create_facility(closed).await.unwrap();
    commands.create_facility(facility_command("Plant East")).await.unwrap();

    let names: Vec<_> = queries
        .list_facilities(ListFacilitiesQuery::default())
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["Plant East", "Closed Mill"]);

    let operating = queries
        .list_facilities(ListFacilitiesQuery {
            q: Some("TOKYO".into()),
            is_operating: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(operating.len(), 1);
    assert_eq!(operating[0].name, "Plant East");
}
