#![no_main]

use envschema::env_file::parse_str;
use envschema::{Rule, Schema, ValueType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    let env = parse_str(content);

    // Every parsed key gets a typed rule; validation may fail but must not panic
    let mut builder = Schema::builder();
    for (index, key) in env.keys().enumerate() {
        let value_type = match index % 4 {
            0 => ValueType::String,
            1 => ValueType::Int,
            2 => ValueType::Float,
            _ => ValueType::Bool,
        };
        builder = builder.var(key.as_str(), Rule::new().of_type(value_type));
    }
    if let Ok(schema) = builder.build() {
        let _ = schema.validate(&env);
    }
});
