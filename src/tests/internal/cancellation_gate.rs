use crate::downloader::{CancellationGate, DownloadError};
use crate::registry::{DownloadRegistry, DownloadState};

const URL: &str = "https://files.example.com/disk.img";

fn cancelled_state(error: DownloadError) -> DownloadState {
    match error {
        DownloadError::Cancelled { state, .. } => state,
        other => panic!("预期 Cancelled，得到 {other:?}"),
    }
}

#[test]
fn check_passes_while_running() {
    let registry = DownloadRegistry::new();
    registry.register(URL, "/tmp/disk.img", 2);
    let gate = CancellationGate::new(registry, URL);

    assert_eq!(gate.url(), URL);
    assert!(gate.check().is_ok());
    assert!(!gate.is_canceled());
}

#[test]
fn external_stop_is_reported_as_stopped() {
    let registry = DownloadRegistry::new();
    let handle = registry.register(URL, "/tmp/disk.img", 2);
    let gate = CancellationGate::new(registry.clone(), URL);

    handle.stop();
    let state = cancelled_state(gate.check().unwrap_err());
    assert_eq!(state, DownloadState::Stopped);
    // 停止不会被升级为取消
    assert_eq!(registry.get_state(URL), DownloadState::Stopped);
}

#[test]
fn external_cancel_is_reported_as_canceled() {
    let registry = DownloadRegistry::new();
    let handle = registry.register(URL, "/tmp/disk.img", 2);
    let gate = CancellationGate::new(registry, URL);

    handle.cancel();
    assert_eq!(cancelled_state(gate.check().unwrap_err()), DownloadState::Canceled);
}

#[test]
fn escalate_cancels_registry_and_siblings() {
    let registry = DownloadRegistry::new();
    registry.register(URL, "/tmp/disk.img", 3);
    let gate = CancellationGate::new(registry.clone(), URL);
    let sibling = gate.clone();

    let state = cancelled_state(gate.escalate());
    assert_eq!(state, DownloadState::Canceled);
    assert_eq!(registry.get_state(URL), DownloadState::Canceled);

    assert!(sibling.is_canceled(), "克隆的闸门共享取消标志");
    assert_eq!(
        cancelled_state(sibling.check().unwrap_err()),
        DownloadState::Canceled
    );
}

#[test]
fn escalate_is_idempotent() {
    let registry = DownloadRegistry::new();
    registry.register(URL, "/tmp/disk.img", 3);
    let gate = CancellationGate::new(registry, URL);

    let _ = gate.escalate();
    assert_eq!(cancelled_state(gate.escalate()), DownloadState::Canceled);
    assert!(gate.is_canceled());
}

#[test]
fn separate_gates_do_not_share_flag() {
    let registry = DownloadRegistry::new();
    registry.register(URL, "/tmp/disk.img", 3);
    registry.register("https://files.example.com/other", "/tmp/other", 3);

    let gate = CancellationGate::new(registry.clone(), URL);
    let other = CancellationGate::new(registry, "https://files.example.com/other");

    let _ = gate.escalate();
    assert!(!other.is_canceled());
    assert!(other.check().is_ok());
}

#[test]
fn unregistered_url_fails_check() {
    let gate = CancellationGate::new(DownloadRegistry::new(), URL);
    assert_eq!(cancelled_state(gate.check().unwrap_err()), DownloadState::Canceled);
}
