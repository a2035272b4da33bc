#![no_main]
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must either parse or fail with an error value; anything
// that parsed must serialize to a document the parser accepts again. The
// one exception: digit strings long enough to overflow f64 decode to
// non-finite values, which have no JSON spelling.
fuzz_target!(|data: &[u8]| {
    if let Ok(root) = arcspan::parse(data) {
        let rendered = root.to_string();
        if let Err(err) = arcspan::parse(rendered.as_bytes()) {
            assert!(
                rendered.contains("inf") || rendered.contains("NaN"),
                "rendered document failed to re-parse: {err}"
            );
        }
    }
});
