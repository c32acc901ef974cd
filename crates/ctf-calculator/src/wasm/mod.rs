//! WASM Frontend for the calculator
//!
//! The browser page and `localStorage` store only build with the `wasm`
//! feature. The mock DOM and its driver are always available so the page
//! behavior can be tested natively.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::{start, BrowserPage, LocalStorageStore};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
