//! Tests for optional subsystem handling
//!
//! Mock backends record every call so each suppression branch can be checked
//! on its own.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use seedkit_core::{
    ArrayBackend, SeedConfig, SeedInitializer, SubsystemError, TensorBackend,
};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct MockArray {
    name: &'static str,
    available: bool,
    fails: bool,
    log: CallLog,
}

impl ArrayBackend for MockArray {
    fn name(&self) -> &str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.log.push(format!("{}.available", self.name));
        self.available
    }

    fn seed(&self, seed: u64) -> Result<(), SubsystemError> {
        self.log.push(format!("{}.seed({})", self.name, seed));
        if self.fails {
            Err(SubsystemError::failed(self.name, "seed must be < 2**32"))
        } else {
            Ok(())
        }
    }
}

struct MockTensor {
    available: bool,
    gpu: bool,
    fail_at: Option<&'static str>,
    log: CallLog,
}

impl MockTensor {
    fn step(&self, call: String, step: &'static str) -> Result<(), SubsystemError> {
        self.log.push(call);
        match self.fail_at {
            Some(failing) if failing == step => Err(SubsystemError::failed("tensor", step)),
            _ => Ok(()),
        }
    }
}

impl TensorBackend for MockTensor {
    fn name(&self) -> &str {
        "tensor"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn manual_seed(&self, seed: u64) -> Result<(), SubsystemError> {
        self.step(format!("manual_seed({seed})"), "manual_seed")
    }

    fn gpu_available(&self) -> Result<bool, SubsystemError> {
        self.step("gpu_available".to_string(), "gpu_available")?;
        Ok(self.gpu)
    }

    fn manual_seed_all_gpus(&self, seed: u64) -> Result<(), SubsystemError> {
        self.step(format!("manual_seed_all_gpus({seed})"), "manual_seed_all_gpus")
    }

    fn set_deterministic_algorithms(&self, enabled: bool) -> Result<(), SubsystemError> {
        self.step(format!("deterministic={enabled}"), "deterministic")
    }

    fn set_benchmark(&self, enabled: bool) -> Result<(), SubsystemError> {
        self.step(format!("benchmark={enabled}"), "benchmark")
    }
}

fn bare() -> SeedInitializer {
    let config = SeedConfig {
        hash_seed_var: None,
        ..SeedConfig::default()
    };
    SeedInitializer::new(config).unwrap()
}

fn array(name: &'static str, available: bool, fails: bool, log: &CallLog) -> Box<MockArray> {
    Box::new(MockArray {
        name,
        available,
        fails,
        log: log.clone(),
    })
}

fn tensor(gpu: bool, fail_at: Option<&'static str>, log: &CallLog) -> Box<MockTensor> {
    Box::new(MockTensor {
        available: true,
        gpu,
        fail_at,
        log: log.clone(),
    })
}

#[test]
fn test_array_backend_seeded() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_array_backend(array("np", true, false, &log));

    assert_eq!(init.initialize(Some(42), true).unwrap(), 42);
    assert_eq!(log.calls(), vec!["np.available", "np.seed(42)"]);
}

#[test]
fn test_unavailable_array_backend_not_called() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_array_backend(array("np", false, false, &log));

    assert_eq!(init.initialize(Some(42), true).unwrap(), 42);
    assert_eq!(log.calls(), vec!["np.available"]);
}

#[test]
fn test_array_failure_suppressed_and_later_backends_run() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare()
        .with_array_backend(array("first", true, true, &log))
        .with_array_backend(array("second", true, false, &log))
        .with_tensor_backend(tensor(false, None, &log));

    assert_eq!(init.initialize(Some(u64::MAX), true).unwrap(), u64::MAX);
    let calls = log.calls();
    assert!(calls.contains(&format!("first.seed({})", u64::MAX)));
    assert!(calls.contains(&format!("second.seed({})", u64::MAX)));
    assert!(calls.contains(&format!("manual_seed({})", u64::MAX)));
}

#[test]
fn test_tensor_full_sequence_with_gpu() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(true, None, &log));

    init.initialize(Some(7), true).unwrap();
    assert_eq!(
        log.calls(),
        vec![
            "manual_seed(7)",
            "gpu_available",
            "manual_seed_all_gpus(7)",
            "deterministic=true",
            "benchmark=false",
        ]
    );
}

#[test]
fn test_tensor_without_gpu_skips_gpu_seeding() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(false, None, &log));

    init.initialize(Some(7), true).unwrap();
    assert_eq!(
        log.calls(),
        vec!["manual_seed(7)", "gpu_available", "deterministic=true", "benchmark=false"]
    );
}

#[test]
fn test_nondeterministic_leaves_flags_alone() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(true, None, &log));

    init.initialize(Some(7), false).unwrap();
    assert_eq!(
        log.calls(),
        vec!["manual_seed(7)", "gpu_available", "manual_seed_all_gpus(7)"]
    );
}

#[test]
fn test_initialize_configured_passes_config_through() {
    let _g = serial();
    let log = CallLog::default();
    let config = SeedConfig {
        seed: Some(21),
        deterministic: false,
        hash_seed_var: None,
    };
    let init = SeedInitializer::new(config)
        .unwrap()
        .with_tensor_backend(tensor(false, None, &log));

    assert_eq!(init.initialize_configured().unwrap(), 21);
    assert_eq!(log.calls(), vec!["manual_seed(21)", "gpu_available"]);
}

#[test]
fn test_manual_seed_failure_ends_tensor_block() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(true, Some("manual_seed"), &log));

    assert_eq!(init.initialize(Some(7), true).unwrap(), 7);
    assert_eq!(log.calls(), vec!["manual_seed(7)"]);
}

#[test]
fn test_gpu_query_failure_ends_tensor_block() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(true, Some("gpu_available"), &log));

    assert_eq!(init.initialize(Some(7), true).unwrap(), 7);
    assert_eq!(log.calls(), vec!["manual_seed(7)", "gpu_available"]);
}

#[test]
fn test_deterministic_flag_failure_skips_benchmark() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(tensor(false, Some("deterministic"), &log));

    assert_eq!(init.initialize(Some(7), true).unwrap(), 7);
    assert_eq!(
        log.calls(),
        vec!["manual_seed(7)", "gpu_available", "deterministic=true"]
    );
}

#[test]
fn test_failing_tensor_does_not_stop_next_tensor() {
    let _g = serial();
    let broken = CallLog::default();
    let healthy = CallLog::default();
    let init = bare()
        .with_tensor_backend(tensor(true, Some("manual_seed_all_gpus"), &broken))
        .with_tensor_backend(tensor(false, None, &healthy));

    assert_eq!(init.initialize(Some(11), true).unwrap(), 11);
    assert_eq!(
        broken.calls(),
        vec!["manual_seed(11)", "gpu_available", "manual_seed_all_gpus(11)"]
    );
    assert_eq!(healthy.calls().len(), 4);
}

#[test]
fn test_unavailable_tensor_not_called() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare().with_tensor_backend(Box::new(MockTensor {
        available: false,
        gpu: true,
        fail_at: None,
        log: log.clone(),
    }));

    assert_eq!(init.initialize(Some(7), true).unwrap(), 7);
    assert!(log.calls().is_empty());
}

#[test]
fn test_backends_receive_generated_seed() {
    let _g = serial();
    let log = CallLog::default();
    let init = bare()
        .with_array_backend(array("np", true, false, &log))
        .with_tensor_backend(tensor(false, None, &log));

    let seed = init.initialize(None, false).unwrap();
    let calls = log.calls();
    assert!(calls.contains(&format!("np.seed({seed})")));
    assert!(calls.contains(&format!("manual_seed({seed})")));
}

#[test]
fn test_subsystem_error_messages() {
    let err = SubsystemError::failed("torch", "CUDA error");
    assert_eq!(err.to_string(), "torch failed: CUDA error");

    let err = SubsystemError::Unavailable {
        subsystem: "numpy".to_string(),
    };
    assert_eq!(err.to_string(), "numpy is not available");
}
