//! Python-side array and tensor backends
//!
//! Each call acquires the GIL. A failed import becomes
//! [`SubsystemError::Unavailable`], any other Python exception
//! [`SubsystemError::Failed`]; the initializer swallows both.

use pyo3::prelude::*;

use crate::subsystems::{ArrayBackend, SubsystemError, TensorBackend};

fn py_failed(subsystem: &str, err: PyErr) -> SubsystemError {
    SubsystemError::failed(subsystem, err.to_string())
}

fn importable(module: &str) -> bool {
    Python::with_gil(|py| py.import_bound(module).is_ok())
}

/// `numpy.random.seed`
#[derive(Debug, Clone, Copy, Default)]
pub struct NumpyBackend;

impl ArrayBackend for NumpyBackend {
    fn name(&self) -> &str {
        "numpy"
    }

    fn is_available(&self) -> bool {
        importable("numpy")
    }

    fn seed(&self, seed: u64) -> Result<(), SubsystemError> {
        Python::with_gil(|py| -> PyResult<()> {
            py.import_bound("numpy")?
                .getattr("random")?
                .call_method1("seed", (seed,))?;
            Ok(())
        })
        .map_err(|e| py_failed(self.name(), e))
    }
}

/// `torch` CPU/CUDA generators and `torch.backends.cudnn` flags
#[derive(Debug, Clone, Copy, Default)]
pub struct TorchBackend;

impl TorchBackend {
    fn with_torch<T>(
        &self,
        f: impl for<'py> FnOnce(&Bound<'py, PyModule>) -> PyResult<T>,
    ) -> Result<T, SubsystemError> {
        Python::with_gil(|py| {
            let torch = py
                .import_bound("torch")
                .map_err(|_| SubsystemError::Unavailable {
                    subsystem: self.name().to_string(),
                })?;
            f(&torch).map_err(|e| py_failed(self.name(), e))
        })
    }

    fn set_cudnn_flag(&self, flag: &str, value: bool) -> Result<(), SubsystemError> {
        self.with_torch(|torch| {
            torch
                .getattr("backends")?
                .getattr("cudnn")?
                .setattr(flag, value)
        })
    }
}

impl TensorBackend for TorchBackend {
    fn name(&self) -> &str {
        "torch"
    }

    fn is_available(&self) -> bool {
        importable("torch")
    }

    fn manual_seed(&self, seed: u64) -> Result<(), SubsystemError> {
        self.with_torch(|torch| torch.call_method1("manual_seed", (seed,)).map(drop))
    }

    fn gpu_available(&self) -> Result<bool, SubsystemError> {
        self.with_torch(|torch| {
            torch
                .getattr("cuda")?
                .call_method0("is_available")?
                .extract::<bool>()
        })
    }

    fn manual_seed_all_gpus(&self, seed: u64) -> Result<(), SubsystemError> {
        self.with_torch(|torch| {
            torch
                .getattr("cuda")?
                .call_method1("manual_seed_all", (seed,))
                .map(drop)
        })
    }

    fn set_deterministic_algorithms(&self, enabled: bool) -> Result<(), SubsystemError> {
        self.set_cudnn_flag("deterministic", enabled)
    }

    fn set_benchmark(&self, enabled: bool) -> Result<(), SubsystemError> {
        self.set_cudnn_flag("benchmark", enabled)
    }
}
