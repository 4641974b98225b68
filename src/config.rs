//! Block sizes and micro-kernel selection.

use crate::error::{GemmError, Result};

/// Cache blocking parameters.
///
/// - `mc`: rows of A packed per inner-kernel call (L2 resident), multiple of 4
/// - `kc`: depth of one reduction block
/// - `nb`: widest `n` the packed-B panel can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSizes {
    pub mc: usize,
    pub kc: usize,
    pub nb: usize,
}

impl Default for BlockSizes {
    fn default() -> Self {
        BlockSizes {
            mc: 256,
            kc: 128,
            nb: 1000,
        }
    }
}

impl BlockSizes {
    pub const ENV_MC: &'static str = "BLOCKED_GEMM_MC";
    pub const ENV_KC: &'static str = "BLOCKED_GEMM_KC";
    pub const ENV_NB: &'static str = "BLOCKED_GEMM_NB";

    pub fn new(mc: usize, kc: usize, nb: usize) -> Result<Self> {
        let blocks = BlockSizes { mc, kc, nb };
        blocks.validate()?;
        Ok(blocks)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mc == 0 || self.mc % 4 != 0 || self.kc == 0 || self.nb == 0 {
            return Err(GemmError::InvalidBlockSizes {
                mc: self.mc,
                kc: self.kc,
                nb: self.nb,
            });
        }
        Ok(())
    }

    /// Defaults, overridden by `BLOCKED_GEMM_MC` / `_KC` / `_NB` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = BlockSizes::default();
        let read = |key: &str, fallback: usize| -> Result<usize> {
            match lookup(key) {
                None => Ok(fallback),
                Some(raw) => raw.trim().parse().map_err(|_| {
                    GemmError::InvalidConfig(format!("{key}={raw:?} is not a block size"))
                }),
            }
        };

        let blocks = BlockSizes {
            mc: read(Self::ENV_MC, defaults.mc)?,
            kc: read(Self::ENV_KC, defaults.kc)?,
            nb: read(Self::ENV_NB, defaults.nb)?,
        };
        blocks.validate()?;
        log::debug!(
            "block sizes from environment: mc={} kc={} nb={}",
            blocks.mc,
            blocks.kc,
            blocks.nb
        );
        Ok(blocks)
    }
}

/// Which 4×4 micro-kernel the inner kernel calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KernelKind {
    /// 16 scalar accumulators.
    Scalar,
    /// 8 lane-pair accumulators through the element's lane type.
    #[default]
    Lanes,
}

/// Block sizes plus micro-kernel, passed to the `*_with` entry points.
///
/// The plain entry points (`matmul`, `matmul_parallel`) always run with
/// `GemmConfig::default()`; the `BLOCKED_GEMM_*` variables only take effect
/// through a config built with [`GemmConfig::from_env`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GemmConfig {
    pub blocks: BlockSizes,
    pub kernel: KernelKind,
}

impl GemmConfig {
    pub const ENV_KERNEL: &'static str = "BLOCKED_GEMM_KERNEL";

    pub fn new(blocks: BlockSizes, kernel: KernelKind) -> Self {
        GemmConfig { blocks, kernel }
    }

    /// [`BlockSizes::from_env`] plus `BLOCKED_GEMM_KERNEL` (`scalar` or
    /// `lanes`, case-insensitive).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let blocks = BlockSizes::from_lookup(&lookup)?;
        let kernel = match lookup(Self::ENV_KERNEL) {
            None => KernelKind::default(),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "scalar" => KernelKind::Scalar,
                "lanes" => KernelKind::Lanes,
                _ => {
                    return Err(GemmError::InvalidConfig(format!(
                        "{}={raw:?} is not a kernel (scalar, lanes)",
                        Self::ENV_KERNEL
                    )));
                }
            },
        };
        log::debug!("kernel from environment: {:?}", kernel);
        Ok(GemmConfig { blocks, kernel })
    }
}
