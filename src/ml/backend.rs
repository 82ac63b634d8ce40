// ============================================================
// Layer 5 — Backend Selection
// ============================================================
// Training runs on wgpu by default. Building with the `cpu`
// feature swaps in the ndarray backend, for machines without a
// usable GPU adapter.

use burn::backend::Autodiff;

#[cfg(not(feature = "cpu"))]
pub type AppBackend = burn::backend::Wgpu;

#[cfg(feature = "cpu")]
pub type AppBackend = burn::backend::NdArray;

/// AppBackend with gradient tracking, used for fitting
pub type AppAutodiffBackend = Autodiff<AppBackend>;

pub type AppDevice = <AppBackend as burn::prelude::Backend>::Device;

pub fn default_device() -> AppDevice {
    AppDevice::default()
}
