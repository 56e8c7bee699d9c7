// Native test builds compile the logic modules without the wasm frontend
// that drives them.
#![cfg_attr(all(test, not(target_arch = "wasm32")), allow(dead_code))]

#[cfg(any(target_arch = "wasm32", test))]
mod active_link;
#[cfg(any(target_arch = "wasm32", test))]
mod clipboard;
#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod counter;
#[cfg(any(target_arch = "wasm32", test))]
mod extras;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(any(target_arch = "wasm32", test))]
mod lazy_image;
#[cfg(any(target_arch = "wasm32", test))]
mod logging;
#[cfg(any(target_arch = "wasm32", test))]
mod menu;
#[cfg(any(target_arch = "wasm32", test))]
mod notification;
#[cfg(any(target_arch = "wasm32", test))]
mod reveal;
#[cfg(any(target_arch = "wasm32", test))]
mod scroll;
#[cfg(any(target_arch = "wasm32", test))]
mod timeline;
#[cfg(any(target_arch = "wasm32", test))]
mod tooltip;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
