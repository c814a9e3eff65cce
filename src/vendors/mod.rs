// src/vendors/mod.rs

//! Built-in vendor plugins.
//!
//! Adding a vendor means adding a module here and listing its plugin in
//! [`builtin_plugins`].

pub mod afterfx;

use std::sync::Arc;

use crate::plugin::VendorPlugin;

/// Every vendor compiled into this binary, in registration order.
pub fn builtin_plugins() -> Vec<Arc<dyn VendorPlugin>> {
    vec![Arc::new(afterfx::AfterFx)]
}
