pub mod hooks;
pub mod storage;

pub use hooks::{use_prize_wheel, PrizeWheelHandle};
pub use storage::BrowserStorage;

/// Routes `log` output to the browser console. Call once before rendering.
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
}
