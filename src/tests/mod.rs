
#[cfg(target_arch = "wasm32")]
mod dom_panels;
