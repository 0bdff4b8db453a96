#![cfg(test)]

use crate::plugin_system::constraint::ConstraintKind;
use crate::plugin_system::error::PluginSystemError;
use crate::tests::integration::common::TestEnv;

async fn plan_with_b(requirement: &str, b_version: Option<&str>) -> Result<Vec<String>, crate::kernel::Error> {
    let mut env = TestEnv::new().with_manifest("a", &format!(r#"{{ "id": "a", "dependencies": ["{}"] }}"#, requirement));
    if let Some(version) = b_version {
        env = env.with_manifest("b", &format!(r#"{{ "id": "b", "version": "{}" }}"#, version));
    }
    let loader = env.loader();
    let descriptors = loader.discover().await?;
    let plan = loader.plan(&descriptors)?;
    Ok(plan.ids().into_iter().map(str::to_string).collect())
}

#[tokio::test]
async fn test_minimum_version_accepted() {
    assert_eq!(plan_with_b("B 2.0", Some("2.0.0")).await.unwrap(), vec!["b", "a"]);
    assert_eq!(plan_with_b("B 2.0", Some("2.1.0")).await.unwrap(), vec!["b", "a"]);
}

#[tokio::test]
async fn test_minimum_version_rejected() {
    for b_version in [Some("1.9.9"), None] {
        let err = plan_with_b("B 2.0", b_version).await.unwrap_err();
        match err.plugin_system() {
            Some(PluginSystemError::UnsatisfiedDependency { owner, required, requirement }) => {
                assert_eq!(owner, "a");
                assert_eq!(required, "b");
                assert_eq!(requirement.kind(), ConstraintKind::Minimum);
            }
            other => panic!("Expected UnsatisfiedDependency for {:?}, got {:?}", b_version, other),
        }
    }
}

#[tokio::test]
async fn test_version_range() {
    assert!(plan_with_b("B 1.0 2.0", Some("1.5.3")).await.is_ok());

    for b_version in ["0.9.0", "2.0.1"] {
        let err = plan_with_b("B 1.0 2.0", Some(b_version)).await.unwrap_err();
        assert_eq!(err.to_string(), "Mod 'a' needs 'b' at a version between 1.0.0 and 2.0.0");
    }
}

#[tokio::test]
async fn test_malformed_dependency_string() {
    let err = plan_with_b("", Some("1.0")).await.unwrap_err();
    assert!(matches!(
        err.plugin_system(),
        Some(PluginSystemError::DependencyParse { owner, .. }) if owner == "a"
    ));
}
