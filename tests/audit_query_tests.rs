// tests/audit_query_tests.rs
use chrono::Duration;
use nexus_inventory::application::{
    commands::catalog::UpdateProductCommand,
    error::ApplicationError,
    queries::audit::{ListAuditRecordsQuery, ObjectHistoryQuery},
    services::ApplicationServices,
};
use nexus_inventory::domain::errors::DomainError;

mod support;

use support::{ProductBuilder, fixed_now, memory_services};

/// Three products, the first updated twice then deleted; six records stamped
/// one second apart from `fixed_now()`.
async fn seeded() -> (ApplicationServices, i64) {
    let (services, _store) = memory_services();
    let commands = &services.catalog_commands;
    let first = commands
        .create_product(ProductBuilder::new().model("Alpha").build())
        .await
        .unwrap();
    commands
        .create_product(ProductBuilder::new().model("Beta").build())
        .await
        .unwrap();
    commands
        .create_product(ProductBuilder::new().model("Gamma").build())
        .await
        .unwrap();
    for price in [150.0, 175.0] {
        commands
            .update_product(
                first.id,
                UpdateProductCommand {
                    price: Some(price),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
    commands.delete_product(first.id).await.unwrap();
    (services, first.id)
}

fn query() -> ListAuditRecordsQuery {
    ListAuditRecordsQuery {
        limit: 20,
        ..Default::default()
    }
}

#[tokio::test]
async fn list_defaults_to_newest_first() {
    let (services, _) = seeded().await;
    let page = services.audit_queries.list_records(query()).await.unwrap();
    assert_eq!(page.items.len(), 6);
    assert!(!page.has_more);
    assert_eq!(page.items[0].operation, "delete");
    assert!(page.items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn filters_combine() {
    let (services, first) = seeded().await;
    let page = services
        .audit_queries
        .list_records(ListAuditRecordsQuery {
            object_id: Some(first),
            operation: Some("update".into()),
            order: Some("asc".into()),
            ..query()
        })
        .await
        .unwrap();
    let descriptions: Vec<_> = page.items.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "price changed from 100.0 to 150.0",
            "price changed from 150.0 to 175.0"
        ]
    );
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let (services, _) = seeded().await;
    let page = services
        .audit_queries
        .list_records(ListAuditRecordsQuery {
            q: Some("beta".into()),
            ..query()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].description.contains("Model: Beta"));
}

#[tokio::test]
async fn time_window_is_half_open() {
    let (services, _) = seeded().await;
    // records sit at fixed_now() + 0s ..= +5s
    let page = services
        .audit_queries
        .list_records(ListAuditRecordsQuery {
            from: Some(fixed_now() + Duration::seconds(1)),
            to: Some(fixed_now() + Duration::seconds(3)),
            order: Some("asc".into()),
            ..query()
        })
        .await
        .unwrap();
    let ops: Vec<_> = page.items.iter().map(|r| r.operation.as_str()).collect();
    assert_eq!(ops, vec!["insert", "insert"]);
}

#[tokio::test]
async fn cursor_walks_every_record_once() {
    let (services, _) = seeded().await;
    let mut seen = Vec::new();
    let mut cursor = None;
    loop {
        let page = services
            .audit_queries
            .list_records(ListAuditRecordsQuery {
                limit: 4,
                cursor: cursor.take(),
                ..query()
            })
            .await
            .unwrap();
        seen.extend(page.items.iter().map(|r| r.id));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    let mut sorted = seen.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    assert_eq!(seen, sorted);
    assert_eq!(seen.len(), 6);
}

#[tokio::test]
async fn object_history_and_lookup() {
    let (services, first) = seeded().await;
    let history = services
        .audit_queries
        .object_history(ObjectHistoryQuery {
            entity_type: "product".into(),
            object_id: first,
            limit: 20,
            cursor: None,
        })
        .await
        .unwrap();
    assert_eq!(history.items.len(), 4);
    assert!(history.items.iter().all(|r| r.object_id == first));

    let record = services
        .audit_queries
        .get_record(history.items[0].id)
        .await
        .unwrap();
    assert_eq!(record.operation, "delete");

    let missing = services.audit_queries.get_record(9_999).await.unwrap_err();
    assert!(matches!(missing, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn malformed_queries_are_rejected() {
    let (services, _) = seeded().await;
    let audit = &services.audit_queries;

    let unknown = audit
        .object_history(ObjectHistoryQuery {
            entity_type: "shipment".into(),
            object_id: 1,
            limit: 20,
            cursor: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        unknown,
        ApplicationError::Domain(DomainError::UnknownEntity(_))
    ));

    let bad_order = audit
        .list_records(ListAuditRecordsQuery {
            order: Some("sideways".into()),
            ..query()
        })
        .await
        .unwrap_err();
    assert!(matches!(bad_order, ApplicationError::Validation(_)));

    let bad_operation = audit
        .list_records(ListAuditRecordsQuery {
            operation: Some("upsert".into()),
            ..query()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        bad_operation,
        ApplicationError::Domain(DomainError::Validation(_))
    ));

    let empty_window = audit
        .list_records(ListAuditRecordsQuery {
            from: Some(fixed_now()),
            to: Some(fixed_now()),
            ..query()
        })
        .await
        .unwrap_err();
    assert!(matches!(empty_window, ApplicationError::Validation(_)));

    let bad_cursor = audit
        .list_records(ListAuditRecordsQuery {
            cursor: Some("not a cursor".into()),
            ..query()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        bad_cursor,
        ApplicationError::Domain(DomainError::Validation(_))
    ));
}
