//! Scenario tests for row assembly.

use ladle_model::Amount;
use ladle_query::assemble::{self, AssembleError};
use ladle_query::{Row, Value};

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

fn soup_row() -> Row {
    vec![
        Value::from("r1"),
        Value::from("Soup"),
        Value::Null,
        Value::from(true),
        Value::Null,
        Value::List(vec![map(&[
            ("name", Value::from("base")),
            (
                "ingredients",
                Value::List(vec![map(&[
                    ("bi_id", Value::from("bi.u7.9a1")),
                    ("name", Value::from("salt")),
                    ("amount", Value::from("1tsp")),
                ])]),
            ),
        ])]),
        Value::List(vec![map(&[
            ("name", Value::from("steps")),
            (
                "steps",
                Value::List(vec![map(&[
                    ("order_no", Value::from(1i64)),
                    ("step", Value::from("boil water")),
                ])]),
            ),
        ])]),
        Value::List(vec![]),
    ]
}

#[test]
fn assembles_nested_recipe_with_defaults() {
    let recipe = assemble::recipe(&[soup_row()])
        .expect("assembles")
        .expect("present");

    assert_eq!(recipe.id, "r1");
    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.description, "");
    assert_eq!(recipe.image_url, "");
    assert!(recipe.is_visible);

    assert_eq!(recipe.ingredients.len(), 1);
    let base = &recipe.ingredients[0];
    assert_eq!(base.name, "base");
    assert_eq!(base.ingredients.len(), 1);
    assert_eq!(base.ingredients[0].name, "salt");
    assert_eq!(base.ingredients[0].id.to_string(), "bi.u7.9a1");
    assert_eq!(
        base.ingredients[0].amount,
        Amount::Measured {
            value: 1.0,
            unit: "tsp".to_string()
        }
    );

    assert_eq!(recipe.instructions.len(), 1);
    assert_eq!(recipe.instructions[0].name, "steps");
    assert_eq!(recipe.instructions[0].steps[0].order_no, 1);
    assert_eq!(recipe.instructions[0].steps[0].step, "boil water");
    assert!(recipe.tags.is_empty());
}

#[test]
fn zero_rows_is_none_not_error() {
    assert_eq!(assemble::recipe(&[]), Ok(None));
    assert_eq!(assemble::user("u1", &[]), Ok(None));
    assert_eq!(assemble::previews(&[]), Ok(vec![]));
    assert_eq!(assemble::collections(&[]), Ok(vec![]));
}

#[test]
fn container_is_not_duplicated_per_leaf() {
    let ingredients = |n: usize| {
        Value::List(
            (0..n)
                .map(|i| {
                    map(&[
                        ("bi_id", Value::from(format!("bi.u7.9a{i}"))),
                        ("name", Value::from(format!("item{i}"))),
                        ("amount", Value::from("1tsp")),
                    ])
                })
                .collect(),
        )
    };
    let mut row = soup_row();
    row[5] = Value::List(vec![map(&[
        ("name", Value::from("base")),
        ("ingredients", ingredients(3)),
    ])]);

    let recipe = assemble::recipe(&[row]).expect("assembles").expect("present");
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].ingredients.len(), 3);
}

#[test]
fn steps_sort_by_order_no_regardless_of_row_order() {
    let mut row = soup_row();
    row[6] = Value::List(vec![map(&[
        ("name", Value::from("steps")),
        (
            "steps",
            Value::List(vec![
                map(&[
                    ("order_no", Value::from(3i64)),
                    ("step", Value::from("serve")),
                ]),
                map(&[
                    ("order_no", Value::from(1i64)),
                    ("step", Value::from("boil water")),
                ]),
                map(&[
                    ("order_no", Value::from(2i64)),
                    ("step", Value::from("add salt")),
                ]),
            ]),
        ),
    ])]);

    let recipe = assemble::recipe(&[row]).expect("assembles").expect("present");
    let orders: Vec<i64> = recipe.instructions[0]
        .steps
        .iter()
        .map(|s| s.order_no)
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(recipe.instructions[0].steps[0].step, "boil water");
}

#[test]
fn duplicate_step_order_is_rejected() {
    let mut row = soup_row();
    row[6] = Value::List(vec![map(&[
        ("name", Value::from("steps")),
        (
            "steps",
            Value::List(vec![
                map(&[
                    ("order_no", Value::from(1i64)),
                    ("step", Value::from("boil water")),
                ]),
                map(&[
                    ("order_no", Value::from(1i64)),
                    ("step", Value::from("add salt")),
                ]),
            ]),
        ),
    ])]);

    assert_eq!(
        assemble::recipe(&[row]),
        Err(AssembleError::DuplicateOrder {
            container: "steps".to_string(),
            order_no: 1,
        })
    );
}

// A recipe with no containers at all: each OPTIONAL MATCH branch aggregates
// a single all-null group that must vanish, not surface as an empty-named
// container.
#[test]
fn all_null_groups_are_dropped() {
    let null_group = |keys: &[&str]| {
        Value::List(vec![map(
            &keys.iter().map(|k| (*k, Value::Null)).collect::<Vec<_>>(),
        )])
    };
    let mut row = soup_row();
    row[5] = Value::List(vec![map(&[
        ("name", Value::Null),
        ("ingredients", null_group(&["bi_id", "name", "amount"])),
    ])]);
    row[6] = Value::List(vec![map(&[
        ("name", Value::Null),
        ("steps", null_group(&["order_no", "step"])),
    ])]);
    row[7] = null_group(&["tag_id", "name"]);

    let recipe = assemble::recipe(&[row]).expect("assembles").expect("present");
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.instructions.is_empty());
    assert!(recipe.tags.is_empty());
}

#[test]
fn stored_ingredient_id_must_decode() {
    let mut row = soup_row();
    row[5] = Value::List(vec![map(&[
        ("name", Value::from("base")),
        (
            "ingredients",
            Value::List(vec![map(&[
                ("bi_id", Value::from("not-a-composite-id")),
                ("name", Value::from("salt")),
                ("amount", Value::from("1tsp")),
            ])]),
        ),
    ])]);

    match assemble::recipe(&[row]) {
        Err(AssembleError::BadIngredientId { id, .. }) => {
            assert_eq!(id, "not-a-composite-id");
        }
        other => panic!("expected BadIngredientId, got {other:?}"),
    }
}

#[test]
fn wrong_column_count_is_a_shape_error() {
    let row = vec![Value::from("r1"), Value::from("Soup")];
    assert!(matches!(
        assemble::recipe(&[row]),
        Err(AssembleError::Shape(_))
    ));
    assert!(matches!(
        assemble::previews(&[vec![Value::from("r1")]]),
        Err(AssembleError::Shape(_))
    ));
}

#[test]
fn user_profile_and_settings_normalize() {
    let rows = vec![vec![Value::from("Dana"), Value::Null, Value::Null]];
    let user = assemble::user("u7", &rows).expect("assembles").expect("present");
    assert_eq!(user.id, "u7");
    assert_eq!(user.name, "Dana");
    assert_eq!(user.profile, "");
    assert_eq!(user.settings, "");
}

#[test]
fn previews_normalize_optional_fields() {
    let rows = vec![
        vec![
            Value::from("r1"),
            Value::from("Soup"),
            Value::Null,
            Value::Null,
            Value::from("u7"),
        ],
        vec![
            Value::from("r2"),
            Value::from("Bread"),
            Value::from("crusty"),
            Value::from("http://img/bread.png"),
            Value::from("u7"),
        ],
    ];
    let previews = assemble::previews(&rows).expect("assembles");
    assert_eq!(previews.len(), 2);
    assert_eq!(previews[0].description, "");
    assert_eq!(previews[0].image_url, "");
    assert_eq!(previews[1].image_url, "http://img/bread.png");
}

#[test]
fn empty_collection_has_no_members() {
    let rows = vec![vec![
        Value::from("weeknight"),
        Value::List(vec![map(&[
            ("r_id", Value::Null),
            ("name", Value::Null),
            ("description", Value::Null),
            ("image_url", Value::Null),
            ("owner_id", Value::Null),
        ])]),
    ]];
    let collections = assemble::collections(&rows).expect("assembles");
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "weeknight");
    assert!(collections[0].recipes.is_empty());
}
