use super::*;
use pretty_assertions::assert_eq;
use sift_ir::StringInterner;

fn point(interner: &StringInterner, x: i64, y: i64) -> Value {
    let mut fields = FxHashMap::default();
    fields.insert(interner.intern("x"), Value::Int(x));
    fields.insert(interner.intern("y"), Value::Int(y));
    Value::object(interner.intern("Point"), fields)
}

// equals

#[test]
fn numbers_compare_across_int_and_float() {
    assert!(Value::Int(1).equals(&Value::Float(1.0)));
    assert!(Value::Float(-3.0).equals(&Value::Int(-3)));
    assert!(!Value::Int(1).equals(&Value::Float(1.5)));
}

#[test]
fn int_float_equality_is_exact_for_large_values() {
    // 2^53 + 1 is not representable as f64; widening would round it down.
    let big = 9_007_199_254_740_993_i64;
    assert!(!Value::Int(big).equals(&Value::Float(9_007_199_254_740_992.0)));
    assert!(Value::Int(big - 1).equals(&Value::Float(9_007_199_254_740_992.0)));
    assert!(!Value::Int(i64::MAX).equals(&Value::Float(f64::INFINITY)));
}

#[test]
fn nan_is_never_equal() {
    let nan = Value::Float(f64::NAN);
    assert!(!nan.equals(&nan));
    assert!(!nan.equals(&Value::Int(0)));
}

#[test]
fn bool_is_not_a_number() {
    assert!(!Value::Bool(true).equals(&Value::Int(1)));
    assert!(!Value::Int(0).equals(&Value::Bool(false)));
    assert!(Value::Bool(true).equals(&Value::Bool(true)));
}

#[test]
fn strings_compare_by_content() {
    assert!(Value::string("hello").equals(&Value::string("hello")));
    assert!(!Value::string("hello").equals(&Value::string("world")));
    assert!(!Value::string("1").equals(&Value::Int(1)));
}

#[test]
fn sequences_compare_element_wise() {
    let a = Value::sequence(vec![Value::Int(1), Value::Float(2.0)]);
    let b = Value::sequence(vec![Value::Float(1.0), Value::Int(2)]);
    let shorter = Value::sequence(vec![Value::Int(1)]);
    assert!(a.equals(&b));
    assert!(!a.equals(&shorter));
}

#[test]
fn mappings_ignore_entry_order() {
    let a = Value::mapping(vec![
        (Value::string("a"), Value::Int(1)),
        (Value::string("b"), Value::Int(2)),
    ])
    .unwrap();
    let b = Value::mapping(vec![
        (Value::string("b"), Value::Int(2)),
        (Value::string("a"), Value::Int(1)),
    ])
    .unwrap();
    let c = Value::mapping(vec![(Value::string("a"), Value::Int(1))]).unwrap();
    assert!(a.equals(&b));
    assert!(!a.equals(&c));
}

#[test]
fn objects_compare_by_identity() {
    let interner = StringInterner::new();
    let p = point(&interner, 0, 0);
    let same = p.clone();
    let twin = point(&interner, 0, 0);
    assert!(p.equals(&same));
    assert!(!p.equals(&twin));
}

// is_truthy

#[test]
fn truthiness_of_scalars() {
    assert!(Value::Bool(true).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Int(-1).is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::Float(-0.0).is_truthy());
    assert!(Value::Float(f64::NAN).is_truthy());
    assert!(!Value::None.is_truthy());
}

#[test]
fn truthiness_of_containers() {
    let interner = StringInterner::new();
    assert!(!Value::string("").is_truthy());
    assert!(Value::string("x").is_truthy());
    assert!(!Value::sequence(vec![]).is_truthy());
    assert!(Value::sequence(vec![Value::None]).is_truthy());
    assert!(!Value::mapping(vec![]).unwrap().is_truthy());
    assert!(Value::object(interner.intern("Empty"), FxHashMap::default()).is_truthy());
}

// same_identity

#[test]
fn identity_only_for_singletons() {
    assert!(Value::Bool(true).same_identity(&Value::Bool(true)));
    assert!(!Value::Bool(true).same_identity(&Value::Bool(false)));
    assert!(Value::None.same_identity(&Value::None));
    assert!(!Value::Bool(true).same_identity(&Value::Int(1)));
    assert!(!Value::Int(1).same_identity(&Value::Int(1)));
}

// factories and accessors

#[test]
fn mapping_rejects_equal_keys() {
    let err = Value::mapping(vec![
        (Value::Int(1), Value::string("int")),
        (Value::Float(1.0), Value::string("float")),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        ValueError::DuplicateKey {
            key: "1.0".to_string()
        }
    );
}

#[test]
fn mapping_lookup_uses_equals() {
    let m = Value::mapping(vec![
        (Value::string("bandwidth"), Value::Int(10)),
        (Value::Int(2), Value::string("two")),
    ])
    .unwrap();
    let (index, found) = m.mapping_lookup(&Value::Float(2.0)).unwrap();
    assert_eq!(index, 1);
    assert_eq!(found.as_str(), Some("two"));
    assert!(m.mapping_lookup(&Value::string("latency")).is_none());
    assert!(Value::Int(3).mapping_lookup(&Value::Int(3)).is_none());
}

#[test]
fn sub_mapping_keeps_selected_entries() {
    let m = Value::mapping(vec![
        (Value::string("a"), Value::Int(1)),
        (Value::string("b"), Value::Int(2)),
        (Value::string("c"), Value::Int(3)),
    ])
    .unwrap();
    let entries = m.as_mapping().unwrap();
    let rest = Value::sub_mapping(entries.iter().skip(1));
    assert_eq!(rest.to_string(), "{\"b\": 2, \"c\": 3}");
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(Value::Int(4).as_int(), Some(4));
    assert_eq!(Value::Int(4).as_float(), None);
    assert_eq!(Value::Bool(false).as_bool(), Some(false));
    assert_eq!(Value::string("s").as_sequence(), None);
    assert_eq!(Value::None.as_object().map(ObjectValue::len), None);
}

#[test]
fn type_names() {
    let names: Vec<_> = [
        Value::Int(0),
        Value::Float(0.0),
        Value::Bool(true),
        Value::None,
        Value::string(""),
        Value::sequence(vec![]),
        Value::mapping(vec![]).unwrap(),
    ]
    .iter()
    .map(Value::type_name)
    .collect();
    assert_eq!(
        names,
        vec!["int", "float", "bool", "NoneType", "str", "sequence", "mapping"]
    );
}

// display

#[test]
fn display_uses_python_spelling() {
    let v = Value::sequence(vec![
        Value::Bool(true),
        Value::None,
        Value::Float(1.0),
        Value::string("hi"),
    ]);
    assert_eq!(v.to_string(), "[True, None, 1.0, \"hi\"]");
}

#[test]
fn display_with_resolves_object_names() {
    let interner = StringInterner::new();
    let v = Value::sequence(vec![point(&interner, 0, 5)]);
    assert_eq!(v.display_with(&interner), "[Point(x=0, y=5)]");
}

#[test]
fn object_field_access() {
    let interner = StringInterner::new();
    let p = point(&interner, 3, 4);
    let obj = p.as_object().unwrap();
    assert_eq!(obj.type_tag(), interner.intern("Point"));
    assert!(obj.has_field(interner.intern("x")));
    assert!(!obj.has_field(interner.intern("z")));
    assert_eq!(obj.field(interner.intern("y")), Some(&Value::Int(4)));
    assert_eq!(obj.len(), 2);
    assert!(!obj.is_empty());
}
