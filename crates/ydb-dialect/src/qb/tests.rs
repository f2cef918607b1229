//! Cross-builder tests for the qb module.

use crate::compiler::{QueryCompiler, YdbQueryCompiler};
use crate::qb::{Expr, Order, SqlQb, delete, insert, replace, select, update, upsert};
use crate::render::render;
use crate::types::{NativeValue, PrimitiveType, Type, TypedValue};

#[test]
fn test_select_with_conditions() {
    let qb = select("series")
        .eq("title", "IT Crowd")
        .gte("release_date", chrono::NaiveDate::from_ymd_opt(2006, 2, 3).unwrap())
        .limit(10);

    let compiled = qb.compile().unwrap();
    assert_eq!(
        compiled.sql(),
        "SELECT * FROM `series` WHERE `title` = $p1 AND `release_date` >= $p2 LIMIT 10"
    );
    assert_eq!(compiled.parameters()[0], TypedValue::utf8("IT Crowd"));
    assert_eq!(
        compiled.parameters()[1].ty(),
        &Type::Primitive(PrimitiveType::Timestamp)
    );
}

#[test]
fn test_constructors_pick_statement() {
    assert!(insert("t").set("a", 1u32).to_sql().starts_with("INSERT INTO"));
    assert!(upsert("t").set("a", 1u32).to_sql().starts_with("UPSERT INTO"));
    assert!(replace("t").set("a", 1u32).to_sql().starts_with("REPLACE INTO"));
    assert_eq!(update("t").set("a", 1u32).to_sql(), "UPDATE `t` SET `a` = $p1");
    assert_eq!(delete("t").eq("a", 1u32).to_sql(), "DELETE FROM `t` WHERE `a` = $p1");
}

#[test]
fn test_complex_expr() {
    let qb = select("episodes")
        .and_expr(Expr::or(vec![
            Expr::eq("series_id", 1u32),
            Expr::and(vec![Expr::eq("series_id", 2u32), Expr::gt("season_id", 1u32)]),
        ]))
        .is_not_null("air_date")
        .order_by("air_date", Order::Desc);

    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM `episodes` WHERE (`series_id` = $p1 OR (`series_id` = $p2 AND `season_id` > $p3)) AND `air_date` IS NOT NULL ORDER BY `air_date` DESC"
    );
}

#[test]
fn test_optional_filters() {
    let title: Option<&str> = None;
    let qb = select("series").eq_opt("title", title).eq_opt("series_id", Some(1u32));
    assert_eq!(qb.to_sql(), "SELECT * FROM `series` WHERE `series_id` = $p1");
}

#[test]
fn test_rendered_wire_text() {
    let compiled = select("series").eq("series_id", 1u32).compile().unwrap();
    let text = render(compiled.sql(), compiled.parameters()).unwrap();
    assert_eq!(
        text,
        "declare $p1 AS Uint32;\nSELECT * FROM `series` WHERE `series_id` = $p1;\n"
    );
}

#[test]
fn test_unsupported_value_fails_compile() {
    let err = select("series")
        .eq("series_id", NativeValue::Null)
        .compile()
        .unwrap_err();
    assert!(err.is_type_error());
    assert!(select("series").eq("series_id", -5i64).to_sql().starts_with("<invalid:"));
}

#[test]
fn test_compile_with_other_compiler() {
    struct Plain;
    impl QueryCompiler for Plain {
        fn append_value(
            &self,
            value: &NativeValue,
            state: &mut crate::compiler::CompileState,
        ) -> crate::YdbResult<()> {
            let n = state.push_parameter(crate::types::value_to_typed(value)?);
            state.append(&format!("${n}"));
            Ok(())
        }
    }

    let compiled = select("series").eq("series_id", 1u32).compile_with(&Plain).unwrap();
    assert_eq!(compiled.sql(), "SELECT * FROM \"series\" WHERE \"series_id\" = $1");
    let ydb = select("series").compile_with(&YdbQueryCompiler).unwrap();
    assert_eq!(ydb.sql(), "SELECT * FROM `series`");
}

#[test]
fn test_builder_without_sync() {
    use std::cell::Cell;

    // Cell makes the builder !Sync.
    struct Counted {
        builds: Cell<u32>,
    }
    impl SqlQb for Counted {
        fn build(&self) -> crate::YdbResult<crate::Sql> {
            self.builds.set(self.builds.get() + 1);
            let mut q = crate::sql("SELECT * FROM ");
            q.push_ident("series")?;
            Ok(q)
        }
    }

    let qb = Counted { builds: Cell::new(0) };
    assert_eq!(qb.to_sql(), "SELECT * FROM `series`");
    assert_eq!(qb.compile().unwrap().sql(), "SELECT * FROM `series`");
    assert_eq!(qb.builds.get(), 2);
}
