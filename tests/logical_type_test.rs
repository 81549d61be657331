//! Logical type construction, accessors and type strings

use duckchunk::types::{decimal_internal_type, enum_internal_type};
use duckchunk::{DuckChunkError, DuckChunkResult, LogicalType, TypeId};
use pretty_assertions::assert_eq;

#[test]
fn test_decimal_internal_types() -> DuckChunkResult<()> {
    let cases = [
        (4, 1, TypeId::SmallInt),
        (9, 4, TypeId::Integer),
        (18, 6, TypeId::BigInt),
        (38, 10, TypeId::HugeInt),
    ];
    for (width, scale, internal) in cases {
        let decimal = LogicalType::decimal(width, scale)?;
        assert_eq!(decimal.type_id(), TypeId::Decimal);
        assert_eq!(decimal.decimal_width()?, width);
        assert_eq!(decimal.decimal_scale()?, scale);
        assert_eq!(decimal.decimal_internal_type()?, internal);
        assert_eq!(decimal_internal_type(width), internal);
        decimal.release();
    }
    Ok(())
}

#[test]
fn test_decimal_rejects_bad_parameters() {
    assert!(matches!(
        LogicalType::decimal(0, 0),
        Err(DuckChunkError::InvalidParameter(_))
    ));
    assert!(matches!(
        LogicalType::decimal(39, 2),
        Err(DuckChunkError::InvalidParameter(_))
    ));
    assert!(matches!(
        LogicalType::decimal(4, 5),
        Err(DuckChunkError::InvalidParameter(_))
    ));
}

fn members(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("m{}", i)).collect()
}

#[test]
fn test_enum_internal_types() -> DuckChunkResult<()> {
    let cases = [
        (2, TypeId::UTinyInt),
        (300, TypeId::USmallInt),
        (70_000, TypeId::UInteger),
    ];
    for (count, internal) in cases {
        let enumeration = LogicalType::enumeration(members(count))?;
        assert_eq!(enumeration.type_id(), TypeId::Enum);
        assert_eq!(enumeration.enum_dictionary_size()?, count);
        assert_eq!(enumeration.enum_internal_type()?, internal);
        assert_eq!(enum_internal_type(count)?, internal);
    }
    assert_eq!(enum_internal_type(256)?, TypeId::UTinyInt);
    assert_eq!(enum_internal_type(257)?, TypeId::USmallInt);
    Ok(())
}

#[test]
fn test_enum_dictionary() -> DuckChunkResult<()> {
    let mood = LogicalType::enumeration(["sad", "ok", "happy"])?;
    assert_eq!(mood.enum_dictionary_value(0)?, "sad");
    assert_eq!(mood.enum_dictionary_value(2)?, "happy");
    assert_eq!(mood.enum_dictionary()?, &["sad", "ok", "happy"]);
    assert!(matches!(
        mood.enum_dictionary_value(3),
        Err(DuckChunkError::IndexOutOfRange { index: 3, len: 3, .. })
    ));

    assert!(LogicalType::enumeration(Vec::<String>::new()).is_err());
    assert!(LogicalType::enumeration(["a", "a"]).is_err());
    Ok(())
}

#[test]
fn test_enum_index_lookup() -> DuckChunkResult<()> {
    let birds = LogicalType::enumeration(["DUCK_DUCK_ENUM", "GOOSE"])?;
    assert_eq!(birds.enum_internal_type()?, TypeId::UTinyInt);
    assert_eq!(birds.enum_dictionary_size()?, 2);
    assert_eq!(birds.enum_dictionary_value(0)?, "DUCK_DUCK_ENUM");
    assert_eq!(birds.enum_dictionary_value(1)?, "GOOSE");
    Ok(())
}

#[test]
fn test_list_and_array_children() -> DuckChunkResult<()> {
    let varchar = LogicalType::varchar();
    let list = LogicalType::list(&varchar);
    assert_eq!(list.type_id(), TypeId::List);
    assert_eq!(list.list_child_type()?, varchar);

    let array = LogicalType::array(&LogicalType::integer(), 3)?;
    assert_eq!(array.type_id(), TypeId::Array);
    assert_eq!(array.array_size()?, 3);
    assert_eq!(array.array_child_type()?.type_id(), TypeId::Integer);

    assert!(LogicalType::array(&varchar, 0).is_err());
    Ok(())
}

#[test]
fn test_children_outlive_their_parent() -> DuckChunkResult<()> {
    let element = LogicalType::double();
    let list = LogicalType::list(&element);
    let child = list.list_child_type()?;
    list.release();
    assert_eq!(child.type_id(), TypeId::Double);
    // the element passed in is still usable too
    assert_eq!(element, child);
    Ok(())
}

#[test]
fn test_map_key_and_value() -> DuckChunkResult<()> {
    let map = LogicalType::map(&LogicalType::varchar(), &LogicalType::bigint());
    assert_eq!(map.type_id(), TypeId::Map);
    assert_eq!(map.map_key_type()?.type_id(), TypeId::Varchar);
    assert_eq!(map.map_value_type()?.type_id(), TypeId::BigInt);
    Ok(())
}

#[test]
fn test_struct_fields() -> DuckChunkResult<()> {
    let point = LogicalType::struct_type([
        ("x", LogicalType::double()),
        ("y", LogicalType::double()),
        ("label", LogicalType::varchar()),
    ])?;
    assert_eq!(point.struct_child_count()?, 3);
    assert_eq!(point.struct_child_name(2)?, "label");
    assert_eq!(point.struct_child_type(0)?.type_id(), TypeId::Double);
    assert!(matches!(
        point.struct_child_name(3),
        Err(DuckChunkError::IndexOutOfRange { .. })
    ));

    let duplicate = LogicalType::struct_type([
        ("a", LogicalType::integer()),
        ("a", LogicalType::integer()),
    ]);
    assert!(matches!(duplicate, Err(DuckChunkError::InvalidParameter(_))));
    Ok(())
}

#[test]
fn test_union_members() -> DuckChunkResult<()> {
    let number_or_text = LogicalType::union_type([
        ("num", LogicalType::integer()),
        ("text", LogicalType::varchar()),
    ])?;
    assert_eq!(number_or_text.type_id(), TypeId::Union);
    assert_eq!(number_or_text.union_member_count()?, 2);
    assert_eq!(number_or_text.union_member_name(1)?, "text");
    assert_eq!(number_or_text.union_member_type(0)?.type_id(), TypeId::Integer);

    let none: Vec<(String, LogicalType)> = Vec::new();
    assert!(LogicalType::union_type(none).is_err());
    Ok(())
}

#[test]
fn test_accessor_on_wrong_type_is_a_mismatch() {
    let integer = LogicalType::integer();
    assert_eq!(
        integer.decimal_width(),
        Err(DuckChunkError::TypeMismatch {
            expected: "DECIMAL".into(),
            actual: TypeId::Integer,
        })
    );
    assert!(matches!(
        integer.list_child_type(),
        Err(DuckChunkError::TypeMismatch { .. })
    ));
    assert!(matches!(
        integer.struct_child_count(),
        Err(DuckChunkError::TypeMismatch { .. })
    ));
}

#[test]
fn test_alias() {
    let mut money = LogicalType::decimal(18, 2).map(|t| t.with_alias("money")).unwrap();
    assert_eq!(money.alias(), Some("money"));
    assert_eq!(money.to_string(), "DECIMAL(18,2)");
    money.set_alias(None);
    assert_eq!(money.alias(), None);
}

#[test]
fn test_primitive_rejects_parameterized_ids() {
    assert!(LogicalType::primitive(TypeId::Varchar).is_ok());
    for id in [TypeId::Decimal, TypeId::Enum, TypeId::List, TypeId::Struct] {
        assert!(matches!(
            LogicalType::primitive(id),
            Err(DuckChunkError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_type_strings_round_trip() -> DuckChunkResult<()> {
    let cases = [
        "INTEGER",
        "DECIMAL(18,3)",
        "VARCHAR[]",
        "INTEGER[3]",
        "MAP(VARCHAR, INTEGER[])",
        "STRUCT(\"a\" INTEGER, \"b c\" VARCHAR)",
        "UNION(\"num\" INTEGER, \"text\" VARCHAR)",
        "ENUM('sad', 'it''s ok')",
    ];
    for text in cases {
        let parsed: LogicalType = text.parse()?;
        assert_eq!(parsed.to_string(), text);
    }

    let lower: LogicalType = "struct(a int, b text[])".parse()?;
    assert_eq!(lower.to_string(), "STRUCT(\"a\" INTEGER, \"b\" VARCHAR[])");
    assert!("INTEGER)".parse::<LogicalType>().is_err());
    assert!("NOT_A_TYPE".parse::<LogicalType>().is_err());
    Ok(())
}

#[test]
fn test_type_codes() {
    for id in TypeId::ALL.iter() {
        assert_eq!(TypeId::from_code(id.code()), Some(*id));
    }
    assert_eq!(TypeId::Boolean.code(), 1);
    assert_eq!(TypeId::Integer.code(), 4);
    assert_eq!(TypeId::Varchar.code(), 17);
}
