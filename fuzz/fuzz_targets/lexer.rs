// fuzz_targets/lexer.rs
#![no_main]

use gosubset_parser::lexer::{Lexer, Tok};
use gosubset_parser::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let mut max_end = 0usize;
    let mut last_real_end = 0usize;
    let mut steps = 0usize;
    let max_steps = s.len().saturating_mul(2) + 2;
    let mut errored = false;

    for item in Lexer::with_config(&s, &Config::go()) {
        assert!(!errored, "token after a lex error");
        steps += 1;
        assert!(steps <= max_steps);

        let (start, tok, end) = match item {
            Ok(t) => t,
            Err(e) => {
                assert!(e.span.start <= e.span.end);
                assert!(e.span.end as usize <= s.len());
                errored = true;
                continue;
            }
        };

        assert!(start <= end);
        assert!(end <= s.len());

        let injected = matches!(tok, Tok::Semi) && start == end;
        if !injected {
            assert!(start >= last_real_end);
            last_real_end = end;
            assert!(end >= max_end);
        } else {
            assert!(start >= max_end);
        }
        max_end = max_end.max(end);
    }
});
