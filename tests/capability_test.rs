use arch_atomics::{Backend, Barrier, Capability, CapabilityError, FencePolicy, MemoryModel};
use serde_json::json;

#[test]
fn arithmetic_backend_follows_the_os() {
    let arithmetic = Capability::CURRENT.arithmetic;

    #[cfg(windows)]
    assert_eq!(arithmetic, Backend::WindowsIntrinsic);
    #[cfg(target_os = "nto")]
    assert_eq!(arithmetic, Backend::QnxIntrinsic);
    #[cfg(target_os = "android")]
    assert_eq!(arithmetic, Backend::AndroidIntrinsic);
    #[cfg(not(any(windows, target_os = "nto", target_os = "android")))]
    assert_eq!(arithmetic, Backend::GccBuiltin);
}

#[test]
fn cas_backend_follows_the_feature_and_architecture() {
    let cap = Capability::CURRENT;

    if cfg!(feature = "no-hardware-cas") {
        assert_eq!(cap.compare_and_swap, Backend::GenericFallback);
        assert_eq!(cap.require_hardware_cas(), Err(CapabilityError::NoHardwareCas));
    } else {
        assert_ne!(cap.compare_and_swap, Backend::GenericFallback);
        assert_eq!(cap.require_hardware_cas(), Ok(()));
    }
}

#[test]
fn wide_atomics_flag_matches_target() {
    let cap = Capability::CURRENT;
    assert_eq!(cap.atomics_64, cfg!(target_has_atomic = "64"));
    assert_eq!(cap.require_atomics_64().is_ok(), cap.atomics_64);
}

#[test]
fn fence_policy_is_consistent_with_memory_model() {
    let cap = Capability::CURRENT;
    let policy = cap.fence_policy();

    match cap.memory_model() {
        MemoryModel::StronglyOrdered => {
            assert_eq!(
                policy,
                FencePolicy {
                    store_load: Barrier::Hardware,
                    ..FencePolicy::COMPILER_ONLY
                }
            );
        }
        MemoryModel::WeaklyOrdered => {
            assert!(policy.load_load.is_hardware());
            assert!(policy.load_store.is_hardware());
            assert!(policy.store_load.is_hardware());
            assert!(policy.store_store.is_hardware());
            assert!(policy.after_lock.is_hardware());
            assert!(policy.before_unlock.is_hardware());
        }
        MemoryModel::Unrecognized => assert_eq!(policy, FencePolicy::COMPILER_ONLY),
    }
}

#[test]
fn backend_names_match_serialized_form() {
    let all = [
        Backend::WindowsIntrinsic,
        Backend::QnxIntrinsic,
        Backend::AndroidIntrinsic,
        Backend::GccBuiltin,
        Backend::InlineAsmX86,
        Backend::InlineAsmArmv7,
        Backend::InlineAsmPpc64le,
        Backend::GenericFallback,
    ];
    for backend in all {
        assert_eq!(serde_json::to_value(backend).unwrap(), json!(backend.name()));
        assert_eq!(backend.to_string(), backend.name());
    }
}

#[test]
fn capability_serializes_per_component() {
    let value = serde_json::to_value(Capability::CURRENT).unwrap();
    assert_eq!(value["arithmetic"], json!(Capability::CURRENT.arithmetic.name()));
    assert_eq!(value["compare_and_swap"], json!(Capability::CURRENT.compare_and_swap.name()));
    assert_eq!(value["fences"], json!(Capability::CURRENT.fences.name()));
    assert_eq!(value["atomics_64"], json!(Capability::CURRENT.atomics_64));
}

#[test]
fn capability_error_is_a_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}

    let err = CapabilityError::NoHardwareCas;
    assert_error(&err);
    assert!(err.to_string().contains("compare-and-swap"));
}
