//! Tests for `#[derive(Capture)]` on structs and enums.

#![cfg(feature = "json")]

use std::marker::PhantomData;

use probe_snapshot::{
    Capture, CaptureConfig, Frame, Limits, Reflect, capture_json,
};
use serde_json::{Value, json};

fn capture<T: probe_snapshot::Captured>(value: &T) -> Value {
    let config = CaptureConfig {
        limits: Limits::new(3, 10, 255, 20),
        ..CaptureConfig::default()
    };
    let text = capture_json(value, std::any::type_name::<T>(), &config).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[derive(Capture)]
struct Address {
    city: String,
    zip: u32,
}

#[derive(Capture)]
struct Customer {
    id: u64,
    name: String,
    address: Address,
    #[capture(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
    #[capture(redact)]
    #[allow(dead_code)]
    internal_note: String,
}

#[test]
fn struct_fields_in_declaration_order() {
    let customer = Customer {
        id: 7,
        name: "Ada".into(),
        address: Address {
            city: "London".into(),
            zip: 1815,
        },
        cache: vec![1, 2, 3],
        internal_note: "vip".into(),
    };
    let value = capture(&customer);
    assert_eq!(value["type"], "integration_derive::Customer");
    let fields = value["fields"].as_object().unwrap();
    let names: Vec<&str> = fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["id", "name", "address", "internal_note"]);
    assert_eq!(fields["id"], json!({"type": "u64", "value": "7"}));
    assert_eq!(
        fields["address"],
        json!({
            "type": "integration_derive::Address",
            "fields": {
                "city": {"type": "alloc::string::String", "value": "London"},
                "zip": {"type": "u32", "value": "1815"}
            }
        })
    );
    assert_eq!(
        fields["internal_note"],
        json!({"type": "alloc::string::String", "notCapturedReason": "redactedIdent"})
    );
}

#[derive(Capture)]
struct Animal {
    legs: u8,
}

#[derive(Capture)]
struct Dog {
    name: &'static str,
    #[capture(parent)]
    animal: Animal,
}

#[test]
fn parent_fields_follow_own_fields() {
    let dog = Dog {
        name: "Rex",
        animal: Animal { legs: 4 },
    };
    let layers = dog.declared_fields().unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].type_name, "integration_derive::Dog");
    assert_eq!(layers[1].type_name, "integration_derive::Animal");

    let value = capture(&dog);
    assert_eq!(
        value["fields"],
        json!({
            "name": {"type": "&str", "value": "Rex"},
            "legs": {"type": "u8", "value": "4"}
        })
    );
}

#[derive(Capture)]
struct Account {
    id: u32,
}

#[derive(Capture)]
struct AdminAccount {
    id: u32,
    #[capture(parent)]
    account: Account,
}

#[test]
fn shadowed_parent_field_keeps_both_values() {
    let admin = AdminAccount {
        id: 1,
        account: Account { id: 2 },
    };
    assert_eq!(
        capture(&admin)["fields"],
        json!({
            "id": {"type": "u32", "value": "1"},
            "Account::id": {"type": "u32", "value": "2"}
        })
    );
}

#[derive(Capture)]
struct Pair(i32, #[capture(skip)] (), String);

#[test]
fn tuple_fields_are_named_by_position() {
    let value = capture(&Pair(1, (), "two".into()));
    let names: Vec<&str> = value["fields"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, ["0", "2"]);
}

#[derive(Capture)]
struct Tagged<T, M> {
    value: T,
    marker: PhantomData<M>,
}

struct NotCapturable;

#[test]
fn generic_bounds_only_where_needed() {
    let tagged: Tagged<Vec<u8>, NotCapturable> = Tagged {
        value: vec![1],
        marker: PhantomData,
    };
    let value = capture(&tagged);
    assert_eq!(value["fields"]["value"]["size"], "1");
    assert!(value["fields"].get("marker").is_none());
}

#[derive(Capture)]
enum Status {
    Active,
    Suspended { reason: String, days: u16 },
    Migrated(u64),
}

#[test]
fn unit_variants_capture_their_name() {
    assert_eq!(
        capture(&Status::Active),
        json!({"type": "integration_derive::Status", "value": "Active"})
    );
}

#[test]
fn data_variants_are_objects() {
    let value = capture(&Status::Suspended {
        reason: "abuse".into(),
        days: 30,
    });
    assert_eq!(
        value["fields"],
        json!({
            "reason": {"type": "alloc::string::String", "value": "abuse"},
            "days": {"type": "u16", "value": "30"}
        })
    );
    let layers = Status::Migrated(9).declared_fields().unwrap();
    assert_eq!(layers[0].type_name, "integration_derive::Status::Migrated");
    assert_eq!(capture(&Status::Migrated(9))["fields"]["0"]["value"], "9");
}

#[derive(Capture)]
struct Node {
    label: String,
    next: Option<Box<Node>>,
}

#[test]
fn recursive_structures_stop_at_depth() {
    let list = Node {
        label: "a".into(),
        next: Some(Box::new(Node {
            label: "b".into(),
            next: Some(Box::new(Node {
                label: "c".into(),
                next: Some(Box::new(Node {
                    label: "d".into(),
                    next: None,
                })),
            })),
        })),
    };
    let value = capture(&list);
    let third = &value["fields"]["next"]["fields"]["next"];
    assert_eq!(third["fields"]["label"]["value"], "c");
    assert_eq!(
        third["fields"]["next"],
        json!({"type": "integration_derive::Node", "notCapturedReason": "depth"})
    );
}

#[derive(Capture)]
struct Login {
    user: String,
    password: String,
}

#[test]
fn frame_documents_group_arguments_and_locals() {
    let login = Login {
        user: "ada".into(),
        password: "hunter2".into(),
    };
    let attempts = 3_u8;
    let document = Frame::new()
        .argument("login", &login)
        .local("attempts", &attempts)
        .to_json_document(&CaptureConfig::default())
        .unwrap();
    let value: Value = serde_json::from_str(&document).unwrap();
    assert_eq!(
        value["arguments"]["login"]["fields"]["password"]["notCapturedReason"],
        "redactedIdent"
    );
    assert_eq!(value["arguments"]["login"]["fields"]["user"]["value"], "ada");
    assert_eq!(
        value["locals"]["attempts"],
        json!({"type": "u8", "value": "3"})
    );
}
