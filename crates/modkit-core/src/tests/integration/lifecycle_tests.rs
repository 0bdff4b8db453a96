#![cfg(test)]

use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::stage::{Hook, LifecycleStage};
use crate::storage::config::{ConfigData, ModConfigStore};
use crate::tests::integration::common::{drain, new_journal, test_factory, Journal, TestEnv};

const IDS: [&str; 3] = ["alpha", "beta", "gamma"];

async fn booted_registry(env: &TestEnv, journal: &Journal, failing: Option<(&str, Hook)>) -> PluginRegistry {
    let loader = env.loader();
    let descriptors = loader.discover().await.unwrap();
    let plan = loader.plan(&descriptors).unwrap();
    let factory = test_factory(&IDS, journal, failing);
    loader.instantiate(plan, &factory, loader.config_store()).unwrap()
}

fn chain_env() -> TestEnv {
    TestEnv::new()
        .with_manifest("alpha", r#"{ "id": "alpha" }"#)
        .with_manifest("beta", r#"{ "id": "beta", "dependencies": ["alpha"] }"#)
        .with_manifest("gamma", r#"{ "id": "gamma", "load_after": ["beta"] }"#)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let env = chain_env();
    let journal = new_journal();
    let mut registry = booted_registry(&env, &journal, None).await;

    registry.run_preload().unwrap();
    registry.run_load().unwrap();
    registry.run_postload().unwrap();
    drain(&journal);

    registry.run_update().unwrap();
    registry.run_late_update().unwrap();
    assert_eq!(
        drain(&journal),
        vec!["alpha:update", "beta:update", "gamma:update", "alpha:late_update", "beta:late_update", "gamma:late_update"]
    );

    registry.run_unload().unwrap();
    assert_eq!(drain(&journal), vec!["gamma:unload", "beta:unload", "alpha:unload"]);
    assert_eq!(registry.current_stage(), Some(LifecycleStage::Unload));
}

#[tokio::test]
async fn test_second_plugin_failure_stops_third() {
    let env = chain_env();
    let journal = new_journal();
    let mut registry = booted_registry(&env, &journal, Some(("beta", Hook::Load))).await;

    registry.run_preload().unwrap();
    drain(&journal);

    match registry.run_load() {
        Err(PluginSystemError::StageFailure { id, stage, .. }) => {
            assert_eq!(id, "beta");
            assert_eq!(stage, Hook::Load);
        }
        other => panic!("Expected StageFailure, got {:?}", other),
    }
    assert_eq!(drain(&journal), vec!["alpha:load", "beta:load"]);

    // Nothing runs per frame when boot did not finish
    registry.run_update().unwrap();
    assert!(drain(&journal).is_empty());
}

#[tokio::test]
async fn test_reload_restores_persisted_config() {
    let env = chain_env();
    let store = ModConfigStore::new(env.config().config_dir);
    let mut saved = ConfigData::new();
    saved.set("level", "expert").unwrap();
    store.save("gamma", &saved).unwrap();

    let journal = new_journal();
    let mut registry = booted_registry(&env, &journal, None).await;
    registry.run_preload().unwrap();
    registry.run_load().unwrap();
    registry.run_postload().unwrap();
    drain(&journal);

    registry.run_reload().unwrap();
    assert_eq!(
        drain(&journal),
        vec!["alpha:reload", "beta:reload", "gamma:level=expert", "gamma:reload"]
    );
    assert_eq!(registry.current_stage(), Some(LifecycleStage::Finished));

    registry.run_fixed_update().unwrap();
    assert_eq!(drain(&journal).len(), 3);
}
