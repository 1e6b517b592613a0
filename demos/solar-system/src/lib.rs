use wasm_bindgen::prelude::*;

orrery_web::export_orrery!("solar-system", orrery_core::catalog::SOLAR_SYSTEM_JSON);
