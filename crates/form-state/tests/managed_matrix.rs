//! End-to-end behaviour of managed form state: construction, live writes,
//! rendering.

use form_state::{create_managed, FormStateError, ManagedRecord, ManagedValue, TransportValue};
use form_state_type::SchemaBuilder;
use form_state_value::{bracket_key, BinaryPayload, OpaqueValue, PathSeg, Record, Value};
use proptest::prelude::*;
use serde_json::json;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6f64).prop_map(Value::Number),
        "[a-z0-9 ]{0,6}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(|b| Value::Binary(BinaryPayload::new(b))),
    ]
}

fn container() -> impl Strategy<Value = Value> {
    leaf()
        .prop_recursive(4, 40, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                    .prop_map(|m| Value::Record(m.into_iter().collect::<Record>())),
            ]
        })
        .prop_filter("root must be a container", Value::is_container)
}

fn leaf_keys(value: &Value, path: &mut Vec<PathSeg>, out: &mut Vec<String>) {
    match value {
        Value::Record(fields) => {
            for (k, v) in fields {
                path.push(PathSeg::from(k.as_str()));
                leaf_keys(v, path, out);
                path.pop();
            }
        }
        Value::Sequence(items) => {
            for (i, v) in items.iter().enumerate() {
                path.push(PathSeg::from(i));
                leaf_keys(v, path, out);
                path.pop();
            }
        }
        _ => out.push(bracket_key(path)),
    }
}

proptest! {
    #[test]
    fn render_emits_one_entry_per_leaf_at_its_bracket_key(v in container()) {
        let managed = create_managed(&v, None).unwrap();
        let mut expected = Vec::new();
        leaf_keys(&v, &mut Vec::new(), &mut expected);
        let rendered: Vec<String> = managed.render().keys().map(str::to_owned).collect();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn managed_data_reads_like_the_initial_value(v in container()) {
        let managed = create_managed(&v, None).unwrap();
        prop_assert_eq!(managed.to_value(), v);
    }
}

#[test]
fn non_container_roots_produce_no_handle() {
    let roots = [
        Value::from(3.5),
        Value::from("text"),
        Value::from(false),
        Value::Null,
        Value::from(BinaryPayload::new(b"raw".to_vec())),
    ];
    for root in &roots {
        assert!(matches!(
            create_managed(root, None),
            Err(FormStateError::RootType { .. })
        ));
    }
}

#[test]
fn written_containers_are_managed_at_any_depth() {
    let mut form = create_managed(&Value::from(json!({"profile": {}})), None).unwrap();
    let root = form.data_mut().as_record_mut().unwrap();

    let profile = root.record_mut("profile").unwrap();
    profile.set("address", Value::from(json!({"city": "Oslo", "lines": ["a"]})));

    let address = profile.record_mut("address").unwrap();
    assert_eq!(address["city"], Value::from("Oslo"));

    // the freshly written record wraps what is written into it
    address.set("geo", Value::from(json!({"lat": 59.9})));
    address.sequence_mut("lines").unwrap().push(Value::from(json!({"n": 1})));
    assert!(matches!(address["geo"], ManagedValue::Record(_)));
    assert!(matches!(address["lines"][1], ManagedValue::Record(_)));

    let keys: Vec<_> = form.render().keys().map(str::to_owned).collect();
    assert_eq!(
        keys,
        vec![
            "profile[address][city]",
            "profile[address][lines][0]",
            "profile[address][lines][1][n]",
            "profile[address][geo][lat]",
        ]
    );
}

#[test]
fn binary_payload_keeps_identity_through_writes_and_render() {
    let file = BinaryPayload::file("cv.pdf", "application/pdf", b"%PDF".to_vec());
    let mut form = create_managed(&Value::from(json!({"docs": []})), None).unwrap();
    form.data_mut()
        .as_record_mut()
        .unwrap()
        .sequence_mut("docs")
        .unwrap()
        .push(file.clone());

    let stored = form.data()["docs"][0].as_leaf().and_then(Value::as_binary).unwrap();
    assert!(stored.ptr_eq(&file));

    let body = form.render();
    match body.get("docs[0]") {
        Some(TransportValue::Binary(b)) => assert!(b.ptr_eq(&file)),
        other => panic!("expected a raw payload, got {other:?}"),
    }
}

#[test]
fn render_matches_bracket_key_example() {
    let form = create_managed(&Value::from(json!({"user": {"name": "Bob"}, "tags": ["a", "b"]})), None).unwrap();
    let entries: Vec<_> = form
        .render()
        .into_entries()
        .into_iter()
        .map(|(k, v)| (k, v.as_text().map(str::to_owned)))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("user[name]".to_owned(), Some("Bob".to_owned())),
            ("tags[0]".to_owned(), Some("a".to_owned())),
            ("tags[1]".to_owned(), Some("b".to_owned())),
        ]
    );
}

#[test]
fn render_reflects_state_at_call_time() {
    let mut form = create_managed(&Value::from(json!({"n": 1})), None).unwrap();
    let first = form.render();
    assert_eq!(first.get("n"), Some(&TransportValue::from("1")));

    form.data_mut().as_record_mut().unwrap().set("n", 2);
    let second = form.render();
    assert_eq!(second.get("n"), Some(&TransportValue::from("2")));
    assert_ne!(first, second);
    assert_eq!(form.render(), second);
}

#[test]
fn explicit_schema_mismatch_fails_before_a_handle_exists() {
    let s = SchemaBuilder::new();
    let schema = s.Object(vec![s.Key("email", s.email())], None);
    let err = create_managed(&Value::from(json!({"email": "invalid"})), Some(&schema)).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.issues()[0].key(), "email");
    assert_eq!(err.to_string(), validation.to_string());
}

#[test]
fn caller_value_and_managed_data_are_independent() {
    let avatar = BinaryPayload::new(vec![0xff, 0xd8]);
    let mut original = Value::from(json!({"name": "Ann", "tags": ["x"]}));
    if let Value::Record(fields) = &mut original {
        fields.insert("avatar".into(), Value::from(avatar.clone()));
    }

    let mut form = create_managed(&original, None).unwrap();

    if let Value::Record(fields) = &mut original {
        fields.insert("name".into(), Value::from("Changed"));
        if let Some(Value::Sequence(tags)) = fields.get_mut("tags") {
            tags.push(Value::from("y"));
        }
    }
    assert_eq!(form.data()["name"], Value::from("Ann"));
    assert_eq!(form.data()["tags"], Value::from(json!(["x"])));

    let stored = form.data()["avatar"].as_leaf().and_then(Value::as_binary).unwrap();
    assert!(stored.ptr_eq(&avatar));

    // and the other way round
    form.data_mut().as_record_mut().unwrap().set("name", "Bea");
    assert_eq!(original.get("name"), Some(&Value::from("Changed")));
}

#[test]
fn sequence_root_renders_bare_indices() {
    let mut form = create_managed(&Value::from(json!([{"a": 1}, "b"])), None).unwrap();
    form.data_mut().as_sequence_mut().unwrap().set(3, "d");
    let keys: Vec<_> = form.render().keys().map(str::to_owned).collect();
    assert_eq!(keys, vec!["0[a]", "1", "2", "3"]);
    assert_eq!(form.render().get("2"), Some(&TransportValue::from("undefined")));
}

#[test]
fn opaque_leaves_are_accepted_and_render_as_text() {
    let due = OpaqueValue::new("date", "2024-05-01T00:00:00.000Z");
    let mut initial = Record::new();
    initial.insert("title".into(), Value::from("Q2 report"));
    initial.insert("due".into(), Value::from(due.clone()));
    initial.insert("history".into(), Value::Sequence(vec![Value::from(due.clone())]));

    let form = create_managed(&Value::Record(initial), None).unwrap();
    assert_eq!(form.schema().kind(), "obj");
    match form.data()["due"].as_leaf() {
        Some(Value::Unknown(o)) => assert!(o.ptr_eq(&due)),
        other => panic!("expected an opaque leaf, got {other:?}"),
    }

    let body = form.render();
    assert_eq!(body.get("due"), Some(&TransportValue::from("2024-05-01T00:00:00.000Z")));
    assert_eq!(body.get("history[0]"), Some(&TransportValue::from("2024-05-01T00:00:00.000Z")));
    assert!(form.validate().is_ok());
}

#[test]
fn out_of_reach_sequence_writes_are_dropped() {
    let mut form = create_managed(&Value::from(json!({"a": []})), None).unwrap();
    let root = form.data_mut().as_record_mut().unwrap();
    let a = root.sequence_mut("a").unwrap();
    assert!(a.set(usize::MAX, 1).is_none());
    assert!(a.insert(usize::MAX - 1, 1).is_none());
    assert!(!form.data_mut().set_path(&[PathSeg::from("a"), PathSeg::from(usize::MAX)], 1));

    assert!(form.render().is_empty());
    assert!(form.validate().is_ok());
}

#[test]
fn detached_subtrees_can_be_moved_between_trees() {
    let mut a = create_managed(&Value::from(json!({"x": {"k": "v"}})), None).unwrap();
    let mut b = create_managed(&Value::from(json!({})), None).unwrap();

    let moved = a.data_mut().as_record_mut().unwrap().remove("x").unwrap();
    let mut extra = ManagedRecord::new();
    extra.set("z", true);
    let target = b.data_mut().as_record_mut().unwrap();
    target.set("x", moved);
    target.set("y", extra);

    assert!(a.render().is_empty());
    let keys: Vec<_> = b.render().keys().map(str::to_owned).collect();
    assert_eq!(keys, vec!["x[k]", "y[z]"]);
}
