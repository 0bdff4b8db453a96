#![cfg(test)]

use crate::kernel::error::Error;
use crate::plugin_system::descriptor::DescriptorBuilder;
use crate::plugin_system::error::PluginSystemError;
use crate::tests::integration::common::TestEnv;

#[tokio::test]
async fn test_load_before_and_load_after_from_manifests() {
    let env = TestEnv::new()
        .with_manifest("core", r#"{ "id": "core" }"#)
        .with_manifest("ui", r#"{ "id": "ui", "load_after": ["core"] }"#)
        .with_manifest("extra", r#"{ "id": "extra", "load_before": ["core"] }"#);
    let loader = env.loader();

    let descriptors = loader.discover().await.unwrap();
    let plan = loader.plan(&descriptors).unwrap();
    assert_eq!(plan.ids(), vec!["extra", "core", "ui"]);
}

#[tokio::test]
async fn test_mixed_case_ids_are_normalized() {
    let env = TestEnv::new()
        .with_manifest("Core", r#"{ "id": "Core" }"#)
        .with_manifest("Ui", r#"{ "id": "UI", "load_after": ["CORE"], "dependencies": ["Core 1.0"] }"#);
    let loader = env.loader();

    let descriptors = loader.discover().await.unwrap();
    let plan = loader.plan(&descriptors).unwrap();
    assert_eq!(plan.ids(), vec!["core", "ui"]);
}

#[tokio::test]
async fn test_duplicate_between_manifest_and_binary() {
    let env = TestEnv::new().with_manifest("dup", r#"{ "id": "dup" }"#);
    let packed = vec![
        DescriptorBuilder::new("dup")
            .source_path(env.mods_dir().join("dup.so"))
            .embedded()
            .build(),
    ];
    let loader = env.loader_with_packed(packed);

    match loader.discover().await {
        Err(err) => match err.plugin_system() {
            Some(PluginSystemError::DuplicateId { id, path, first_path }) => {
                assert_eq!(id, "dup");
                assert_eq!(path, &env.mods_dir().join("dup.so"));
                assert_eq!(first_path, &env.mods_dir().join("dup").join("mod.json"));
            }
            other => panic!("Expected DuplicateId, got {:?}", other),
        },
        Ok(set) => panic!("Expected DuplicateId, discovered {:?}", set.ids().collect::<Vec<_>>()),
    }
}

#[tokio::test]
async fn test_cycle_across_manifests_and_binaries() {
    let env = TestEnv::new().with_manifest("a", r#"{ "id": "a", "load_after": ["b"] }"#);
    let packed = vec![DescriptorBuilder::new("b").load_after("a").embedded().build()];
    let loader = env.loader_with_packed(packed);

    let descriptors = loader.discover().await.unwrap();
    match loader.plan(&descriptors) {
        Err(Error::PluginSystem(PluginSystemError::CircularDependency { path })) => {
            assert_eq!(path, vec!["a", "b", "a"]);
        }
        other => panic!("Expected CircularDependency, got {:?}", other),
    }
}
