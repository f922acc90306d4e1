use std::sync::Arc;

use vmc_client::{ApiConfig, ApiProviders, BackendKind, RunMode};

fn config(mode: RunMode, use_mock: bool) -> ApiConfig {
    ApiConfig {
        use_mock,
        mode,
        ..ApiConfig::default()
    }
}

#[test]
fn development_with_mock_flag_selects_mock() {
    assert_eq!(
        config(RunMode::Development, true).backend(),
        BackendKind::Mock
    );
}

#[test]
fn production_or_unset_flag_selects_http() {
    assert_eq!(
        config(RunMode::Development, false).backend(),
        BackendKind::Http
    );
    assert_eq!(
        config(RunMode::Production, true).backend(),
        BackendKind::Http
    );
}

#[test]
fn resolution_is_memoized_per_registry() {
    let providers = ApiProviders::new(config(RunMode::Development, true));

    let first = providers.vm();
    let second = providers.vm();
    assert!(Arc::ptr_eq(&first, &second));

    let chat_first = providers.chat();
    let chat_second = providers.chat();
    assert!(Arc::ptr_eq(&chat_first, &chat_second));
}

#[test]
fn concurrent_first_calls_resolve_to_one_client() {
    let providers = Arc::new(ApiProviders::new(config(RunMode::Development, true)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let providers = providers.clone();
            std::thread::spawn(move || providers.vm())
        })
        .collect();

    let clients: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for client in &clients[1..] {
        assert!(Arc::ptr_eq(&clients[0], client));
    }
}

#[tokio::test]
async fn mock_selection_serves_mock_data() {
    let providers = ApiProviders::new(config(RunMode::Development, true));
    let vm = providers.vm();

    let instance = vm.get_instance("1").await.unwrap();
    assert_eq!(instance.name, "production-web-server");
}
