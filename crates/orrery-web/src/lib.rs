pub mod runner;

pub use runner::SimulationRunner;

// Re-exported for use inside `export_orrery!`.
pub use js_sys;
pub use log;
pub use orrery_core;

use wasm_bindgen::JsValue;

/// Install the panic hook and the console logger. Safe to call more than once.
pub fn install_console() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Convert a load-time error into a JS exception value.
pub fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn float_array(data: &[f32]) -> js_sys::Float32Array {
    js_sys::Float32Array::from(data)
}

pub fn pixel_array(data: &[u8]) -> js_sys::Uint8ClampedArray {
    js_sys::Uint8ClampedArray::from(data)
}

/// Generate all `#[wasm_bindgen]` exports for an orrery page.
///
/// Generates:
/// - `thread_local!` storage for the SimulationRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input handlers, queries, textures,
///   frame buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// orrery_web::export_orrery!("solar-system", orrery_web::orrery_core::catalog::SOLAR_SYSTEM_JSON);
/// ```
///
/// # Arguments
///
/// - `$page_name`: A string literal used in the initialization log message
/// - `$default_catalog`: Catalog JSON used when `orrery_init` gets none
#[macro_export]
macro_rules! export_orrery {
    ($page_name:literal, $default_catalog:expr) => {
        use std::cell::RefCell;

        use $crate::orrery_core::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimulationRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SimulationRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Orrery not initialized. Call orrery_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn orrery_init(catalog_json: Option<String>, config_json: Option<String>) -> Result<(), JsValue> {
            $crate::install_console();

            let catalog = catalog_json.as_deref().unwrap_or($default_catalog);
            let runner = $crate::SimulationRunner::from_json(catalog, config_json.as_deref())
                .map_err($crate::to_js_error)?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            $crate::log::info!("{}: initialized", $page_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn orrery_tick() {
            with_runner(|r| r.tick());
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn orrery_pointer_down(button: u32, x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { button, x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        /// The page still has to call `preventDefault` on the wheel event.
        #[wasm_bindgen]
        pub fn orrery_scroll(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Scroll { delta_y }));
        }

        #[wasm_bindgen]
        pub fn orrery_click(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::Click { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn orrery_set_time_speed(speed: f64) {
            with_runner(|r| r.push_input(InputEvent::SetTimeSpeed { speed }));
        }

        #[wasm_bindgen]
        pub fn orrery_select_object(name: String) {
            with_runner(|r| r.push_input(InputEvent::SelectObject { name }));
        }

        // ---- Queries ----

        /// Info string published by the last successful click, at most once.
        #[wasm_bindgen]
        pub fn orrery_take_info() -> Option<String> {
            with_runner(|r| r.take_info())
        }

        #[wasm_bindgen]
        pub fn orrery_object_groups_json() -> String {
            with_runner(|r| r.simulation().object_groups_json())
        }

        #[wasm_bindgen]
        pub fn orrery_bodies_json() -> String {
            with_runner(|r| r.simulation().bodies_json())
        }

        #[wasm_bindgen]
        pub fn orrery_orbit_path(id: u32) -> $crate::js_sys::Float32Array {
            with_runner(|r| $crate::float_array(&r.orbit_path(id)))
        }

        #[wasm_bindgen]
        pub fn orrery_lights_json() -> String {
            with_runner(|r| r.simulation().lights().to_json())
        }

        // ---- Textures (stateless) ----

        #[wasm_bindgen]
        pub fn orrery_planet_texture(
            detail: u32,
            roughness: f32,
            base_hex: &str,
            seed: u32,
        ) -> Result<$crate::js_sys::Uint8ClampedArray, JsValue> {
            let tex = $crate::orrery_core::planet_texture(detail, roughness, base_hex, seed as u64)
                .map_err($crate::to_js_error)?;
            Ok($crate::pixel_array(tex.as_bytes()))
        }

        #[wasm_bindgen]
        pub fn orrery_gas_giant_texture(
            base_hex: &str,
            seed: u32,
        ) -> Result<$crate::js_sys::Uint8ClampedArray, JsValue> {
            let tex = $crate::orrery_core::gas_giant_texture(base_hex, seed as u64)
                .map_err($crate::to_js_error)?;
            Ok($crate::pixel_array(tex.as_bytes()))
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_asteroids() -> u32 {
            with_runner(|r| r.max_asteroids())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
