//! End-to-end tests for the public masking API.
//!
//! These tests exercise the integration of:
//! - `Mask` derive traversal,
//! - strategy resolution through the engine's catalog, and
//! - container traversal for common standard library types.

use std::collections::{BTreeMap, HashMap};

use masker::{Mask, MaskEngine, Overrides, StrategyCatalog};

#[test]
fn test_builtin_strategy_through_catalog() {
    let catalog = StrategyCatalog::with_builtins();
    let full = catalog.resolve("full").unwrap();
    assert_eq!(full("my_secret_password"), "******************");
}

#[test]
fn test_engine_masks_declared_field() {
    #[derive(Mask)]
    struct ApiToken {
        #[mask(strategy = "token")]
        value: String,
    }

    let engine = MaskEngine::new();
    let mut token = ApiToken {
        value: "secret123".to_string(),
    };
    engine.mask(&mut token);
    assert_eq!(token.value, "*********");
}

#[test]
fn test_derive_struct_masks_only_declared_fields() {
    #[derive(Mask)]
    struct User {
        #[mask(strategy = "full")]
        password: String,
        username: String,
    }

    let engine = MaskEngine::new();
    let mut user = User {
        password: "my_secret_password".into(),
        username: "john_doe".into(),
    };
    engine.mask(&mut user);

    assert_eq!(user.password, "******************");
    assert_eq!(user.username, "john_doe");
}

#[test]
fn test_partial_keeps_first_and_last_two() {
    #[derive(Mask)]
    struct Person {
        #[mask(strategy = "partial")]
        name: String,
    }

    let engine = MaskEngine::new();
    let mut person = Person {
        name: "John Doe".into(),
    };
    engine.mask(&mut person);
    assert_eq!(person.name, "Jo****oe");
}

#[test]
fn test_group_alias_in_declaration() {
    #[derive(Mask)]
    struct Patient {
        #[mask(strategy = "PHI")]
        date_of_birth: String,
        #[mask(strategy = "PII")]
        name: String,
    }

    let engine = MaskEngine::new();
    let mut patient = Patient {
        date_of_birth: "1990-12-31".into(),
        name: "John Doe".into(),
    };
    engine.mask(&mut patient);
    assert_eq!(patient.date_of_birth, "****-**-31");
    assert_eq!(patient.name, "Jo****oe");
}

#[test]
fn test_nested_struct_walk() {
    #[derive(Mask)]
    struct Address {
        #[mask(strategy = "full")]
        street: String,
        city: String,
    }

    #[derive(Mask)]
    struct Person {
        #[mask(strategy = "full")]
        name: String,
        #[mask] // Walk into nested struct
        address: Address,
    }

    let engine = MaskEngine::new();
    let mut person = Person {
        name: "John Doe".into(),
        address: Address {
            street: "123 Main Street".into(),
            city: "Springfield".into(),
        },
    };
    engine.mask(&mut person);

    assert_eq!(person.name, "********");
    assert_eq!(person.address.street, "***************");
    assert_eq!(person.address.city, "Springfield");
}

#[test]
fn test_untagged_nested_field_is_not_walked() {
    #[derive(Mask)]
    struct Inner {
        #[mask(strategy = "full")]
        secret: String,
    }

    #[derive(Mask)]
    struct Outer {
        // No #[mask]: the nested struct passes through unchanged.
        inner: Inner,
    }

    let engine = MaskEngine::new();
    let mut outer = Outer {
        inner: Inner {
            secret: "visible".into(),
        },
    };
    engine.mask(&mut outer);
    assert_eq!(outer.inner.secret, "visible");
}

#[test]
fn test_option_and_vec_leaves() {
    #[derive(Mask)]
    struct Profile {
        #[mask(strategy = "email")]
        email: Option<String>,
        #[mask(strategy = "full")]
        recovery_codes: Vec<String>,
        #[mask(strategy = "email")]
        alternate_email: Option<String>,
    }

    let engine = MaskEngine::new();
    let mut profile = Profile {
        email: Some("john.doe@example.com".into()),
        recovery_codes: vec!["abc123".into(), "xyz".into()],
        alternate_email: None,
    };
    engine.mask(&mut profile);

    assert_eq!(profile.email, Some("j*******@example.com".to_string()));
    assert_eq!(profile.recovery_codes, vec!["******", "***"]);
    assert_eq!(profile.alternate_email, None);
}

#[test]
fn test_map_valued_leaf_masks_values_only() {
    #[derive(Mask)]
    struct Headers {
        #[mask(strategy = "full")]
        secrets: HashMap<String, String>,
    }

    let engine = MaskEngine::new();
    let mut headers = Headers {
        secrets: HashMap::from([("authorization".to_string(), "Bearer abc".to_string())]),
    };
    engine.mask(&mut headers);
    assert!(headers.secrets.contains_key("authorization"));
    assert_eq!(headers.secrets["authorization"], "**********");
}

#[test]
fn test_engine_masks_values_inside_maps() {
    #[derive(Mask)]
    struct TokenValue {
        #[mask(strategy = "creditcard")]
        value: String,
    }

    let engine = MaskEngine::new();
    let mut map: HashMap<String, TokenValue> = HashMap::new();
    map.insert(
        "card".to_string(),
        TokenValue {
            value: "abcd1234".to_string(),
        },
    );
    engine.mask(&mut map);
    assert_eq!(map.get("card").unwrap().value, "****1234");
}

#[test]
fn test_btreemap_traversal() {
    #[derive(Mask)]
    struct SecretValue {
        #[mask(strategy = "full")]
        value: String,
    }

    let engine = MaskEngine::new();
    let mut map: BTreeMap<String, SecretValue> = BTreeMap::new();
    map.insert(
        "first".to_string(),
        SecretValue {
            value: "aaa".to_string(),
        },
    );
    map.insert(
        "second".to_string(),
        SecretValue {
            value: "bbbb".to_string(),
        },
    );
    engine.mask(&mut map);
    assert_eq!(map["first"].value, "***");
    assert_eq!(map["second"].value, "****");
}

#[test]
fn test_enum_derive() {
    #[derive(Mask)]
    enum Credential {
        ApiKey {
            #[mask(strategy = "token")]
            key: String,
        },
        Password {
            #[mask(strategy = "password")]
            value: String,
        },
        Anonymous,
    }

    let engine = MaskEngine::new();

    let mut api_key = Credential::ApiKey {
        key: "sk_live_abcdef123456".into(),
    };
    engine.mask(&mut api_key);
    match &api_key {
        Credential::ApiKey { key } => assert_eq!(key, "********************"),
        _ => panic!("Wrong variant"),
    }

    let mut password = Credential::Password {
        value: "super_secret".into(),
    };
    engine.mask(&mut password);
    match &password {
        Credential::Password { value } => assert_eq!(value, "************"),
        _ => panic!("Wrong variant"),
    }

    let mut anonymous = Credential::Anonymous;
    engine.mask(&mut anonymous);
    assert!(matches!(anonymous, Credential::Anonymous));
}

#[test]
fn test_tuple_struct_fields_are_positional() {
    #[derive(Mask)]
    struct Pair(#[mask(strategy = "full")] String, String);

    let engine = MaskEngine::new();
    let mut pair = Pair("secret".into(), "public".into());
    engine.mask(&mut pair);
    assert_eq!(pair.0, "******");
    assert_eq!(pair.1, "public");

    // Tuple fields are addressed by position in override sets.
    let overrides = Overrides::new().set("1", "full");
    let mut pair = Pair("secret".into(), "public".into());
    engine.mask_with_overrides(&mut pair, &overrides);
    assert_eq!(pair.0, "******");
    assert_eq!(pair.1, "******");
}

#[test]
fn test_vec_of_derived_structs() {
    #[derive(Mask)]
    struct Entry {
        #[mask(strategy = "phone")]
        phone: String,
    }

    let engine = MaskEngine::new();
    let mut entries = vec![
        Entry {
            phone: "9876543210".into(),
        },
        Entry {
            phone: "123".into(),
        },
    ];
    engine.mask(&mut entries);
    assert_eq!(entries[0].phone, "******3210");
    assert_eq!(entries[1].phone, "***");
}

#[test]
fn test_external_types_pass_through() {
    #[derive(Mask)]
    struct Record {
        #[mask(strategy = "full")]
        secret: String,
        created_at: std::time::Duration,
        attempts: u32,
        ratio: f64,
    }

    let engine = MaskEngine::new();
    let mut record = Record {
        secret: "abc".into(),
        created_at: std::time::Duration::from_secs(5),
        attempts: 3,
        ratio: 0.5,
    };
    engine.mask(&mut record);
    assert_eq!(record.secret, "***");
    assert_eq!(record.created_at, std::time::Duration::from_secs(5));
    assert_eq!(record.attempts, 3);
    assert!((record.ratio - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_generic_struct_with_leaf_parameter() {
    #[derive(Mask)]
    struct Tagged<T> {
        #[mask(strategy = "full")]
        value: T,
        label: u8,
    }

    let engine = MaskEngine::new();
    let mut tagged = Tagged {
        value: "secret".to_string(),
        label: 1,
    };
    engine.mask(&mut tagged);
    assert_eq!(tagged.value, "******");
    assert_eq!(tagged.label, 1);

    let mut optional = Tagged {
        value: Some("secret".to_string()),
        label: 2,
    };
    engine.mask(&mut optional);
    assert_eq!(optional.value, Some("******".to_string()));
}

#[test]
fn test_registration_applies_everywhere_the_name_is_used() {
    #[derive(Mask)]
    struct Note {
        #[mask(strategy = "redact-words")]
        body: String,
    }

    let mut engine = MaskEngine::new();
    engine.register("redact-words", |s| {
        s.split_whitespace()
            .map(|w| "*".repeat(w.chars().count()))
            .collect::<Vec<_>>()
            .join(" ")
    });

    let mut note = Note {
        body: "meet at noon".into(),
    };
    engine.mask(&mut note);
    assert_eq!(note.body, "**** ** ****");

    // The same name also works as an override target.
    let mut engine2 = MaskEngine::new();
    engine2.register("redact-words", |s| "*".repeat(s.chars().count()));
    let overrides = Overrides::new().set("body", "redact-words");
    let mut note = Note {
        body: "meet at noon".into(),
    };
    engine2.mask_with_overrides(&mut note, &overrides);
    assert_eq!(note.body, "************");
}
