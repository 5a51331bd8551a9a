// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Diagnostics

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Diagnostic line, routed to the browser console under wasm and stderr
/// natively. Not part of any data path.
#[cfg(target_arch = "wasm32")]
pub(crate) fn diag(msg: &str) {
    log(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn diag(msg: &str) {
    eprintln!("{}", msg);
}
