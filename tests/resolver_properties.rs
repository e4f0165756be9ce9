// tests/resolver_properties.rs

use proptest::prelude::*;
use runbook::interpreter::{resolve, INTERPRETERS};

fn known_extension() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop::sample::select(vec![
        (".bat", "cmd"),
        (".cmd", "cmd"),
        (".ps1", "powershell"),
        (".sh", "sh"),
    ])
}

fn scramble_case(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn known_extensions_resolve_in_any_case(
        stem in "[a-zA-Z0-9_-]{1,12}",
        dir in "(/[a-z.]{1,6}){0,3}",
        (ext, interp) in known_extension(),
        mask in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let path = format!("{dir}/{stem}{}", scramble_case(ext, &mask));
        prop_assert_eq!(resolve(&path), interp);
        prop_assert_eq!(resolve(&path), resolve(path.to_lowercase()));
    }

    #[test]
    fn unknown_extensions_resolve_to_direct_execution(
        stem in "[a-z0-9_]{1,12}",
        ext in "[a-z0-9]{1,5}",
    ) {
        prop_assume!(!INTERPRETERS.contains_key(format!(".{ext}").as_str()));
        prop_assert_eq!(resolve(format!("{stem}.{ext}")), "");
        prop_assert_eq!(resolve(&stem), "");
    }
}
