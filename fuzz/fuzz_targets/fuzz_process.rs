#![no_main]

use libfuzzer_sys::fuzz_target;
use wildprompt_core::grammar::parse;
use wildprompt_core::{StoreConfig, WildcardEngine};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = parse(text);

    let engine = WildcardEngine::from_config(StoreConfig::default());
    let _ = engine.process(text, Some(data.len() as u64));
});
