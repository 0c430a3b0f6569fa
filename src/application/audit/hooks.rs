// src/application/audit/hooks.rs
use crate::application::audit::dispatcher::{
    DispatcherBuilder, HookContext, HookSet, PostInsertHook,
};
use crate::domain::audit::{ChangeDescriptor, diff_pending};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;

/// The hook set every tracked kind uses: a per-kind insert summary, a diff of
/// the pending assignments on update, and a dump of the row before delete.
pub fn standard_hooks(kind: EntityKind) -> HookSet {
    let post_insert: PostInsertHook = match kind {
        EntityKind::Product => product_inserted,
        EntityKind::Component => component_inserted,
        EntityKind::Facility => facility_inserted,
        EntityKind::User => user_inserted,
        EntityKind::ProductInventory => product_stock_inserted,
        EntityKind::ComponentInventory => component_stock_inserted,
    };
    HookSet {
        post_insert,
        post_update: describe_update,
        pre_delete: describe_delete,
    }
}

/// Bind the standard hooks for every tracked kind. Inventory kinds are only
/// bound when `track_inventory` is set.
pub fn register_tracked_entities(
    mut builder: DispatcherBuilder,
    track_inventory: bool,
) -> DispatcherBuilder {
    for kind in EntityKind::ALL {
        if kind.is_inventory() && !track_inventory {
            continue;
        }
        builder = builder.register(kind, standard_hooks(kind));
    }
    builder
}

fn product_inserted(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    ctx.record_insert(format!(
        "Product inserted with Model: {}, Category: {}, Price: {}",
        fields.value("model"),
        fields.value("category"),
        fields.value("price"),
    ))
}

fn component_inserted(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    ctx.record_insert(format!(
        "Component created with Name: {}, Brand: {}, Price: {}",
        fields.value("name"),
        fields.value("brand"),
        fields.value("price"),
    ))
}

fn facility_inserted(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    ctx.record_insert(format!(
        "New facility created with Name: {}, Country: {}, ContactInfo: {}",
        fields.value("name"),
        fields.value("country"),
        fields.value("contact_info"),
    ))
}

fn user_inserted(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    ctx.record_insert(format!(
        "User created with Username: {}, Email: {}",
        fields.value("username"),
        fields.value("email"),
    ))
}

fn product_stock_inserted(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    ctx.record_insert(format!(
        "Product inventory created with Product: {}, Facility: {}, Count: {}",
        fields.value("product_id"),
        fields.value("production_facility_id"),
        fields.value("count"),
    ))
}

fn component_stock_inserted(
    ctx: &mut HookContext<'_>,
    fields: &FieldSnapshot,
) -> DomainResult<()> {
    ctx.record_insert(format!(
        "Component inventory created with Component: {}, Facility: {}, Count: {}",
        fields.value("component_id"),
        fields.value("production_facility_id"),
        fields.value("count"),
    ))
}

fn describe_update(
    ctx: &mut HookContext<'_>,
    prior: &FieldSnapshot,
    current: &FieldSnapshot,
    pending: &FieldSnapshot,
) -> DomainResult<()> {
    let kind = ctx.kind;
    if let Some(unknown) = pending.names().find(|name| kind.column(name).is_none()) {
        return Err(DomainError::Audit(format!(
            "cannot diff {}: no field `{unknown}`",
            kind.label()
        )));
    }
    let changes: Vec<ChangeDescriptor> = diff_pending(prior, current, pending)
        .into_iter()
        .map(|change| {
            if kind.is_sensitive(change.field) {
                change.redacted()
            } else {
                change
            }
        })
        .collect();
    ctx.record_update(&changes).map(|_| ())
}

fn describe_delete(ctx: &mut HookContext<'_>, fields: &FieldSnapshot) -> DomainResult<()> {
    let kind = ctx.kind;
    let mut parts = vec![format!("id was '{}'", ctx.object_id)];
    parts.extend(
        fields
            .iter()
            .filter(|(name, value)| !value.is_null() && !kind.is_sensitive(name))
            .map(|(name, value)| format!("{name} was '{value}'")),
    );
    ctx.record_delete(format!("Deleted {} {}", kind.label(), parts.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::audit::dispatcher::MutationHookDispatcher;
    use crate::application::ports::time::Clock;
    use crate::domain::audit::{AuditOperation, TransactionContext};
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    struct NowClock;

    impl Clock for NowClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    fn dispatcher(track_inventory: bool) -> MutationHookDispatcher {
        register_tracked_entities(
            MutationHookDispatcher::builder(Arc::new(NowClock)),
            track_inventory,
        )
        .build()
    }

    fn product() -> FieldSnapshot {
        FieldSnapshot::new()
            .with("brand", "X")
            .with("model", "M1")
            .with("category", "Laptops")
            .with("price", 100.0)
            .with("notes", None::<String>)
    }

    #[test]
    fn insert_summary_uses_fixed_fields() {
        let mut tx = TransactionContext::new();
        dispatcher(true)
            .post_insert(&mut tx, EntityKind::Product, 1, &product())
            .unwrap();
        assert_eq!(
            tx.staged()[0].description,
            "Product inserted with Model: M1, Category: Laptops, Price: 100.0"
        );
    }

    #[test]
    fn price_change_is_the_only_change() {
        let pending = FieldSnapshot::new().with("price", 120.0).with("brand", "X");
        let current = product().overlay(&pending);
        let mut tx = TransactionContext::new();
        dispatcher(true)
            .post_update(&mut tx, EntityKind::Product, 1, &product(), &current, &pending)
            .unwrap();
        assert_eq!(tx.staged().len(), 1);
        assert_eq!(
            tx.staged()[0].description,
            "price changed from 100.0 to 120.0"
        );
    }

    #[test]
    fn unknown_pending_field_is_a_diff_error() {
        let pending = FieldSnapshot::new().with("colour", "red");
        let mut tx = TransactionContext::new();
        let err = dispatcher(true)
            .post_update(&mut tx, EntityKind::Product, 1, &product(), &product(), &pending)
            .unwrap_err();
        assert!(matches!(err, DomainError::Audit(_)));
        assert!(tx.staged().is_empty());
    }

    #[test]
    fn password_changes_are_redacted() {
        let prior = FieldSnapshot::new()
            .with("username", "ops")
            .with("password_hash", "old-hash");
        let pending = FieldSnapshot::new().with("password_hash", "new-hash");
        let current = prior.overlay(&pending);
        let mut tx = TransactionContext::new();
        dispatcher(true)
            .post_update(&mut tx, EntityKind::User, 9, &prior, &current, &pending)
            .unwrap();
        let description = &tx.staged()[0].description;
        assert!(!description.contains("new-hash"));
        assert_eq!(
            description,
            "password_hash changed from [redacted] to [redacted]"
        );
    }

    #[test]
    fn delete_summary_lists_non_null_fields() {
        let mut tx = TransactionContext::new();
        dispatcher(true)
            .pre_delete(&mut tx, EntityKind::Product, 4, &product())
            .unwrap();
        let record = &tx.staged()[0];
        assert_eq!(record.operation, AuditOperation::Delete);
        assert_eq!(
            record.description,
            "Deleted product id was '4'; brand was 'X'; model was 'M1'; category was 'Laptops'; price was '100.0'"
        );
    }

    #[test]
    fn deleted_users_never_leak_their_hash() {
        let fields = FieldSnapshot::new()
            .with("username", "ops")
            .with("password_hash", "secret-hash");
        let mut tx = TransactionContext::new();
        dispatcher(true)
            .pre_delete(&mut tx, EntityKind::User, 2, &fields)
            .unwrap();
        assert!(!tx.staged()[0].description.contains("secret-hash"));
    }

    #[test]
    fn inventory_tracking_is_optional() {
        let untracked = dispatcher(false);
        assert!(!untracked.is_tracked(EntityKind::ProductInventory));
        assert!(untracked.is_tracked(EntityKind::Product));
        assert_eq!(dispatcher(true).tracked_kinds().len(), EntityKind::ALL.len());
    }
}
