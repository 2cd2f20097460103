// fuzz_targets/parser.rs
#![no_main]

use gosubset_parser::{parse_source, parse_source_with, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    for config in [Config::default(), Config::go()] {
        match parse_source_with(&s, &config) {
            Ok(file) => {
                // Canonical text must parse back to the same tree.
                let printed = file.to_string();
                let again = parse_source(&printed).expect("canonical print parses");
                assert_eq!(again, file);
            }
            Err(e) => {
                let span = e.span();
                assert!(span.start <= span.end);
                assert!(span.end as usize <= s.len());
                assert!(e.position().offset <= s.len());
            }
        }
    }
});
