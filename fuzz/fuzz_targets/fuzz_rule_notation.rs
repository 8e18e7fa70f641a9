#![no_main]

use envschema::env_file::parse_str;
use envschema::schema::parse_rule;
use envschema::Schema;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(spec) = std::str::from_utf8(data) else {
        return;
    };

    let Ok((key, rule)) = parse_rule(spec) else {
        return;
    };

    // A rule that parses either compiles or reports an invalid pattern
    if let Ok(schema) = Schema::builder().var(key.as_str(), rule).build() {
        let env = parse_str(&format!("{key}=value"));
        let _ = schema.validate(&env);
    }
});
