// src/application/audit/mod.rs
pub mod dispatcher;
pub mod hooks;
pub mod writer;

pub use dispatcher::{
    DispatcherBuilder, HookContext, HookSet, MutationHookDispatcher, PostInsertHook,
    PostUpdateHook, PreDeleteHook,
};
pub use hooks::{register_tracked_entities, standard_hooks};
pub use writer::{AuditWriter, describe_changes};
