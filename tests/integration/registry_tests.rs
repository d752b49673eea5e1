//! Integration tests for registry ids, removal and enumeration

use assert_matches::assert_matches;
use intercept_core::{
    ConfigError, CoreError, InterceptorManager, InterceptorOptions, InterceptorsConfig,
    Interceptors, ManagerConfig, SharedInterceptorManager,
};
use intercept_tests::{register_failing, register_tag, test_timeout, visited, with_timeout, TestRequest};
use tracing_test::traced_test;

type TrailManager = InterceptorManager<Vec<String>, TestRequest>;

#[test]
fn test_nth_registration_returns_n_minus_one() {
    let mut manager = TrailManager::new();

    for n in 0..10 {
        let id = register_tag(&mut manager, &format!("h{}", n), None);
        assert_eq!(id.index(), n);
        if n % 3 == 0 {
            manager.remove(id);
        }
    }

    assert_eq!(manager.slot_count(), 10);
    assert_eq!(manager.len(), 6);
}

#[test]
fn test_remove_middle_scenario() {
    let mut manager = TrailManager::new();
    let a = register_tag(&mut manager, "A", None);
    let b = register_tag(&mut manager, "B", None);
    let c = register_tag(&mut manager, "C", None);
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

    manager.remove(b);

    assert_eq!(visited(&manager), vec!["A", "C"]);
}

#[test]
fn test_tombstone_is_permanent_scenario() {
    let mut manager = TrailManager::new();
    let a = register_tag(&mut manager, "A", None);
    manager.remove(a);
    let b = register_tag(&mut manager, "B", None);
    assert_eq!(b.index(), 1);

    assert_eq!(visited(&manager), vec!["B"]);

    manager.remove(0usize);
    assert_eq!(visited(&manager), vec!["B"]);
    assert!(manager.contains(b));
}

#[test]
fn test_empty_registry_scenario() {
    let manager = TrailManager::new();
    let mut calls = 0;
    manager.for_each(|_| calls += 1);
    assert_eq!(calls, 0);

    let mut drained = TrailManager::new();
    let only = register_tag(&mut drained, "only", None);
    drained.remove(only);
    drained.for_each(|_| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn test_options_scenario() {
    let mut manager = TrailManager::new();
    manager.register(
        None,
        None,
        Some(InterceptorOptions::new().synchronous(true)),
    );
    manager.register(None, None, None);

    let mut seen = Vec::new();
    manager.for_each(|handler| seen.push((handler.synchronous(), handler.run_when().is_some())));
    assert_eq!(seen, vec![(true, false), (false, false)]);
}

#[test]
fn test_visit_count_matches_effective_removals() {
    let mut manager = TrailManager::new();
    let ids: Vec<_> = (0..8)
        .map(|n| register_tag(&mut manager, &n.to_string(), None))
        .collect();

    // Double removals and never-issued ids must not count.
    for id in [ids[1], ids[1], ids[4], ids[7]] {
        manager.remove(id);
    }
    manager.remove(100usize);

    let mut visits = 0;
    manager.for_each(|_| visits += 1);
    assert_eq!(visits, 8 - 3);
    assert_eq!(visited(&manager), vec!["0", "2", "3", "5", "6"]);

    let stats = manager.stats();
    assert_eq!(stats.total_registered, 8);
    assert_eq!(stats.total_removed, 3);
    assert_eq!(stats.live, 5);
}

#[test]
fn test_enumeration_ignores_handler_outcomes() {
    let mut manager = TrailManager::new();
    register_tag(&mut manager, "A", None);
    let failing = register_failing(&mut manager, "nope");
    register_tag(&mut manager, "C", None);

    let mut visits = 0;
    manager.for_each(|_| visits += 1);
    assert_eq!(visits, 3);
    assert_eq!(visited(&manager), vec!["A", "C"]);

    manager.remove(failing);
    assert_eq!(manager.len(), 2);
}

#[test]
fn test_repeated_removal_is_idempotent() {
    let mut once = TrailManager::new();
    let mut twice = TrailManager::new();
    register_tag(&mut once, "A", None);
    register_tag(&mut once, "B", None);
    register_tag(&mut twice, "A", None);
    register_tag(&mut twice, "B", None);

    once.remove(0usize);
    twice.remove(0usize);
    twice.remove(0usize);

    assert_eq!(visited(&once), visited(&twice));
    assert_eq!(once.stats().total_removed, twice.stats().total_removed);
}

#[test]
fn test_clear_never_reissues_ids() {
    let mut manager = TrailManager::new();
    let a = register_tag(&mut manager, "A", None);
    manager.clear();

    let b = register_tag(&mut manager, "B", None);
    assert_ne!(a, b);

    // An id from before the clear must not reach the new handler.
    manager.remove(a);
    assert_eq!(visited(&manager), vec!["B"]);
}

#[test]
fn test_pair_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interceptors.json");
    std::fs::write(
        &path,
        r#"{"request": {"label": "outbound", "initial_capacity": 4}, "response": {"label": "inbound"}}"#,
    )
    .unwrap();

    let config = InterceptorsConfig::from_file(&path).unwrap();
    let interceptors: Interceptors<Vec<String>, Vec<String>, TestRequest> =
        Interceptors::with_config(config);

    assert_eq!(interceptors.request.label(), "outbound");
    assert_eq!(interceptors.response.label(), "inbound");
    assert_eq!(interceptors.request.config().initial_capacity, 4);
    assert!(interceptors.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manager.toml");
    std::fs::write(&path, "initial_capacity = \"many\"\n").unwrap();

    assert_matches!(
        ManagerConfig::from_file(&path),
        Err(CoreError::Config(ConfigError::InvalidFormat { .. }))
    );
}

#[test]
#[traced_test]
fn test_removal_of_unknown_id_is_not_an_error() {
    let mut manager = TrailManager::with_config(ManagerConfig::labeled("request"));
    manager.remove(7usize);

    assert!(manager.is_empty());
    assert!(logs_contain("ignored removal of inactive interceptor id"));
}

#[tokio::test]
async fn test_shared_registry_across_tasks() {
    let shared: SharedInterceptorManager<Vec<String>, TestRequest> =
        SharedInterceptorManager::with_config(ManagerConfig::labeled("shared"));

    let result = with_timeout(test_timeout(), async {
        let mut tasks = Vec::new();
        for n in 0..16 {
            let shared = shared.clone();
            tasks.push(tokio::spawn(async move {
                let name = n.to_string();
                let id = shared
                    .register_fulfilled(
                        move |mut trail: Vec<String>| {
                            trail.push(name.clone());
                            Ok(trail)
                        },
                        None,
                    )
                    .await;
                if n % 2 == 1 {
                    shared.remove(id).await;
                }
                id
            }));
        }

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await?.index());
        }
        ids.sort_unstable();
        Ok::<_, anyhow::Error>(ids)
    })
    .await
    .unwrap();

    assert_eq!(result, (0..16).collect::<Vec<_>>());
    assert_eq!(shared.len().await, 8);

    let survivors: Vec<String> = shared
        .snapshot()
        .await
        .iter()
        .flat_map(|handler| handler.fulfill(Vec::new()).unwrap())
        .collect();
    assert_eq!(survivors.len(), 8);
    assert!(survivors.iter().all(|name| name.parse::<u32>().unwrap() % 2 == 0));
}

#[test]
fn test_shared_registry_blocking_use() {
    let shared: SharedInterceptorManager<Vec<String>, TestRequest> = SharedInterceptorManager::new();
    let id = tokio_test::block_on(shared.register(None, None, None));

    assert!(tokio_test::block_on(shared.contains(id)));
    tokio_test::block_on(shared.remove(id));
    assert!(tokio_test::block_on(shared.is_empty()));
}
