// The wasm entry point lives in lib.rs behind #[wasm_bindgen(start)];
// this binary only exists so `trunk serve` has something to build.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("vidtweet-frontend targets the browser; build with --target wasm32-unknown-unknown");
}
