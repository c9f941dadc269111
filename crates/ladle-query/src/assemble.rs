//! Row assembly: flattened engine rows into nested domain values.
//!
//! Assembly applies, in order:
//! 1. null-to-default normalization for optional scalars and collections,
//! 2. regrouping of the per-container aggregates — each container appears
//!    once with its leaves nested beneath it,
//! 3. instruction ordering by `order_no`, strictly ascending; a tie is a
//!    write-path defect and is rejected, never silently truncated.
//!
//! Zero rows assemble to `None` or an empty list. "No matching data" is
//! never an error here; errors mean the engine broke the row contract or
//! the stored data broke an invariant.

use crate::value::{Row, Value};
use ladle_model::{
    Amount, BasicIngredient, Collection, IdError, IngredientContainer, Instruction,
    InstructionContainer, Recipe, RecipePreview, RecipeTag, User,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    /// Two steps in one container share an `order_no`.
    #[error("duplicate step order {order_no} in instruction container '{container}'")]
    DuplicateOrder { container: String, order_no: i64 },
    /// A stored ingredient id no longer decodes.
    #[error("stored ingredient id '{id}' does not decode: {source}")]
    BadIngredientId { id: String, source: IdError },
    /// The engine returned rows that contradict the query's shape.
    #[error("unexpected row shape: {0}")]
    Shape(String),
}

// ============================================================================
// Top-level assemblers
// ============================================================================

/// One recipe from its single aggregated row.
pub fn recipe(rows: &[Row]) -> Result<Option<Recipe>, AssembleError> {
    let Some(row) = rows.first() else {
        return Ok(None);
    };
    if rows.len() > 1 {
        return Err(AssembleError::Shape(format!(
            "recipe: expected one aggregated row, got {}",
            rows.len()
        )));
    }
    expect_columns("recipe", row, 8)?;

    Ok(Some(Recipe {
        id: require_str(&row[0], "r.r_id")?.to_string(),
        name: require_str(&row[1], "r.name")?.to_string(),
        description: optional_text(&row[2], "r.description")?,
        is_visible: require_bool(&row[3], "r.is_visible")?,
        image_url: optional_text(&row[4], "r.image_url")?,
        ingredients: ingredient_containers(&row[5])?,
        instructions: instruction_containers(&row[6])?,
        tags: tags(&row[7])?,
    }))
}

/// One user from a point-lookup row. The id is the caller's; the engine
/// returns only name, profile and settings.
pub fn user(u_id: &str, rows: &[Row]) -> Result<Option<User>, AssembleError> {
    let Some(row) = rows.first() else {
        return Ok(None);
    };
    expect_columns("user", row, 3)?;

    Ok(Some(User {
        id: u_id.to_string(),
        name: require_str(&row[0], "u.name")?.to_string(),
        profile: optional_text(&row[1], "u.profile")?,
        settings: optional_text(&row[2], "u.settings")?,
    }))
}

/// Preview projections, one per row.
pub fn previews(rows: &[Row]) -> Result<Vec<RecipePreview>, AssembleError> {
    rows.iter()
        .map(|row| {
            expect_columns("preview", row, 5)?;
            Ok(RecipePreview {
                id: require_str(&row[0], "r.r_id")?.to_string(),
                name: require_str(&row[1], "r.name")?.to_string(),
                description: optional_text(&row[2], "r.description")?,
                image_url: optional_text(&row[3], "r.image_url")?,
                owner_id: require_str(&row[4], "owner id")?.to_string(),
            })
        })
        .collect()
}

/// Collections, one per row, members nested as previews.
pub fn collections(rows: &[Row]) -> Result<Vec<Collection>, AssembleError> {
    rows.iter()
        .map(|row| {
            expect_columns("collection", row, 2)?;
            let name = require_str(&row[0], "c.name")?.to_string();
            let mut recipes = Vec::new();
            for member in require_list(&row[1], "collection members")? {
                // An empty collection aggregates one all-null member; skip it.
                if member.get("r_id").is_null() {
                    continue;
                }
                recipes.push(RecipePreview {
                    id: require_str(member.get("r_id"), "member r_id")?.to_string(),
                    name: require_str(member.get("name"), "member name")?.to_string(),
                    description: optional_text(member.get("description"), "member description")?,
                    image_url: optional_text(member.get("image_url"), "member image_url")?,
                    owner_id: require_str(member.get("owner_id"), "member owner_id")?.to_string(),
                });
            }
            Ok(Collection { name, recipes })
        })
        .collect()
}

// ============================================================================
// Nested groups
// ============================================================================

fn ingredient_containers(value: &Value) -> Result<Vec<IngredientContainer>, AssembleError> {
    let mut containers = Vec::new();
    for group in require_list(value, "ingredient containers")? {
        // A recipe with no containers aggregates one all-null group; drop it.
        if group.get("name").is_null() {
            continue;
        }
        let name = require_str(group.get("name"), "ic.name")?.to_string();
        let mut ingredients = Vec::new();
        for leaf in require_list(group.get("ingredients"), "basic ingredients")? {
            // Same artifact one level down: a container with no leaves.
            if leaf.get("bi_id").is_null() {
                continue;
            }
            let raw = require_str(leaf.get("bi_id"), "bi.bi_id")?;
            let id = raw
                .parse()
                .map_err(|source| AssembleError::BadIngredientId {
                    id: raw.to_string(),
                    source,
                })?;
            ingredients.push(BasicIngredient {
                id,
                name: require_str(leaf.get("name"), "bi.name")?.to_string(),
                amount: Amount::parse(&optional_text(leaf.get("amount"), "bi.amount")?),
            });
        }
        containers.push(IngredientContainer { name, ingredients });
    }
    Ok(containers)
}

fn instruction_containers(value: &Value) -> Result<Vec<InstructionContainer>, AssembleError> {
    let mut containers = Vec::new();
    for group in require_list(value, "instruction containers")? {
        if group.get("name").is_null() {
            continue;
        }
        let name = require_str(group.get("name"), "sc.name")?.to_string();
        let mut steps = Vec::new();
        for leaf in require_list(group.get("steps"), "instructions")? {
            if leaf.get("order_no").is_null() {
                continue;
            }
            steps.push(Instruction {
                order_no: require_int(leaf.get("order_no"), "st.order_no")?,
                step: require_str(leaf.get("step"), "st.step")?.to_string(),
            });
        }
        steps.sort_by_key(|s| s.order_no);
        if let Some(pair) = steps.windows(2).find(|w| w[0].order_no == w[1].order_no) {
            return Err(AssembleError::DuplicateOrder {
                container: name,
                order_no: pair[0].order_no,
            });
        }
        containers.push(InstructionContainer { name, steps });
    }
    Ok(containers)
}

fn tags(value: &Value) -> Result<Vec<RecipeTag>, AssembleError> {
    let mut tags = Vec::new();
    for entry in require_list(value, "tags")? {
        if entry.get("tag_id").is_null() {
            continue;
        }
        tags.push(RecipeTag {
            id: require_str(entry.get("tag_id"), "tag_id")?.to_string(),
            name: require_str(entry.get("name"), "tag name")?.to_string(),
        });
    }
    Ok(tags)
}

// ============================================================================
// Column accessors
// ============================================================================

fn expect_columns(what: &str, row: &Row, want: usize) -> Result<(), AssembleError> {
    if row.len() != want {
        return Err(AssembleError::Shape(format!(
            "{what}: expected {want} columns, got {}",
            row.len()
        )));
    }
    Ok(())
}

fn require_str<'a>(value: &'a Value, what: &str) -> Result<&'a str, AssembleError> {
    value
        .as_str()
        .ok_or_else(|| AssembleError::Shape(format!("{what}: expected text, got {value:?}")))
}

fn require_bool(value: &Value, what: &str) -> Result<bool, AssembleError> {
    value
        .as_bool()
        .ok_or_else(|| AssembleError::Shape(format!("{what}: expected boolean, got {value:?}")))
}

fn require_int(value: &Value, what: &str) -> Result<i64, AssembleError> {
    value
        .as_int()
        .ok_or_else(|| AssembleError::Shape(format!("{what}: expected integer, got {value:?}")))
}

fn require_list<'a>(value: &'a Value, what: &str) -> Result<&'a [Value], AssembleError> {
    value
        .list_or_empty()
        .ok_or_else(|| AssembleError::Shape(format!("{what}: expected list, got {value:?}")))
}

fn optional_text(value: &Value, what: &str) -> Result<String, AssembleError> {
    value
        .text_or_empty()
        .ok_or_else(|| AssembleError::Shape(format!("{what}: expected text or null, got {value:?}")))
}
