//! Fuzz target for `modsan.toml` and `publish.json` handling.
//!
//! Goal: parsing and resolution should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let legacy = modsan_settings::parse_publish_json(text).ok();
    if let Ok(cfg) = modsan_settings::parse_config_toml(text) {
        let _ = modsan_settings::resolve_config(cfg, legacy, Default::default());
    }
    let _ = modsan_settings::gradle_project_dir(text);
});
