// tests/property_layers.rs

use proptest::prelude::*;
use serde_json::Value;
use starterpack::config::{EnvVars, SoftwareConfig, VersionSelection, merge_env_layers, select_version};
use starterpack::launcher::{parse_literal, parse_script_args};

fn env_layer() -> impl Strategy<Value = EnvVars> {
    proptest::collection::btree_map("[A-Z_]{1,6}", "[a-z0-9/]{0,8}", 0..8)
}

proptest! {
    #[test]
    fn merged_layer_prefers_software_and_keeps_every_key(
        global in env_layer(),
        software in env_layer(),
    ) {
        let merged = merge_env_layers(&global, &software);

        for (k, v) in &software {
            prop_assert_eq!(merged.get(k), Some(v));
        }
        for (k, v) in &global {
            if !software.contains_key(k) {
                prop_assert_eq!(merged.get(k), Some(v));
            }
        }
        for k in merged.keys() {
            prop_assert!(global.contains_key(k) || software.contains_key(k));
        }
    }

    #[test]
    fn latest_version_is_the_maximum_key(
        versions in proptest::collection::btree_set("[0-9]{1,4}(\\.[0-9]{1,2})?", 1..6),
    ) {
        let mut config = SoftwareConfig::default();
        for v in &versions {
            config.versions.insert(v.clone(), Default::default());
        }

        let expected = versions.iter().max().cloned().unwrap();
        prop_assert_eq!(select_version(&config, None), VersionSelection::Latest(expected));
    }

    #[test]
    fn odd_token_counts_are_rejected(
        tokens in proptest::collection::vec("[a-z0-9]{1,5}", 0..9)
            .prop_filter("odd length", |t| t.len() % 2 == 1),
    ) {
        prop_assert!(parse_script_args(&tokens).is_err());
    }

    #[test]
    fn plain_words_stay_strings(word in "[a-z][a-z0-9_]{0,10}") {
        prop_assume!(!matches!(word.as_str(), "true" | "false" | "null"));
        prop_assert_eq!(parse_literal(&word), Value::String(word.clone()));
    }
}
