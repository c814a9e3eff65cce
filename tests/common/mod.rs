#![allow(dead_code)]

use std::error::Error;

pub use starterpack_test_utils::{init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn Error>>;

/// Global document referencing an `afterfx` software document next to it.
pub const GLOBAL_YAML: &str = r#"
software_configs:
  afterfx: afterfx.yaml
env_vars:
  STUDIO_ROOT: /mnt/studio
  AE_PLUGINS: /mnt/studio/plugins/common
"#;

pub const AFTERFX_YAML: &str = r#"
env_vars:
  AE_PLUGINS: /mnt/studio/plugins/afterfx
versions:
  "2023":
    bin_path: /opt/adobe/2023/AfterFX
    env_vars:
      AE_VERSION: "2023"
  "2024":
    bin_path: /opt/adobe/2024/AfterFX
    env_vars:
      AE_VERSION: "2024"
"#;

pub const AFTERFX_CONFIG_PATH: &str = "/studio/config/afterfx.yaml";
