//! Reads block sizes and the kernel choice from the process environment.
//!
//! Kept in its own test binary: it is the only test that sets
//! `BLOCKED_GEMM_*`, so no other test observes the variables.

use blocked_gemm::{BlockSizes, GemmConfig, GemmError, KernelKind, matmul, matmul_with};

#[test]
fn test_from_env_drives_matmul_with() {
    // SAFETY: no other thread in this test binary reads or writes the
    // environment.
    unsafe {
        std::env::set_var(BlockSizes::ENV_MC, "8");
        std::env::set_var(BlockSizes::ENV_KC, "3");
        std::env::set_var(BlockSizes::ENV_NB, "24");
        std::env::set_var(GemmConfig::ENV_KERNEL, "scalar");
    }

    let config = GemmConfig::from_env().unwrap();
    assert_eq!(config.blocks, BlockSizes::new(8, 3, 24).unwrap());
    assert_eq!(config.kernel, KernelKind::Scalar);

    let (m, n, k) = (13, 21, 10);
    let a: Vec<f64> = (0..m * k).map(|v| (v % 7) as f64 - 3.0).collect();
    let b: Vec<f64> = (0..k * n).map(|v| (v % 5) as f64 - 2.0).collect();

    let mut expected = vec![0.0; m * n];
    matmul(m, n, k, &a, m, &b, k, &mut expected, m).unwrap();
    let mut c = vec![0.0; m * n];
    matmul_with(&config, m, n, k, &a, m, &b, k, &mut c, m).unwrap();
    assert_eq!(c, expected);

    // n = 30 no longer fits the configured panel
    let wide = vec![0.0; k * 30];
    let mut c_wide = vec![0.0; m * 30];
    assert_eq!(
        matmul_with(&config, m, 30, k, &a, m, &wide, k, &mut c_wide, m),
        Err(GemmError::CapacityExceeded { n: 30, nb: 24 })
    );

    unsafe { std::env::set_var(BlockSizes::ENV_KC, "deep") };
    assert!(matches!(
        GemmConfig::from_env(),
        Err(GemmError::InvalidConfig(_))
    ));
}
