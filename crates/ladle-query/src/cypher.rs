//! Traversal query construction.
//!
//! Every repository operation maps to one parameterized Cypher statement
//! built here. Caller input is always bound as a `$name` parameter, never
//! spliced into the query text.
//!
//! The recipe fetch aggregates each branch per container before aggregating
//! containers under the recipe, so the engine hands back one row per recipe
//! with nested collections — a container never repeats per leaf.

use crate::value::Value;
use ladle_model::{NewUser, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A query plus its bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub params: BTreeMap<String, Value>,
}

impl Query {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            params: BTreeMap::new(),
        }
    }

    fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }
}

// ============================================================================
// Reads
// ============================================================================

/// Fetch one recipe with ingredients, instructions and tags nested.
///
/// Columns: r_id, name, description, is_visible, image_url, containers,
/// sections, tags. A recipe without containers still returns its row; the
/// OPTIONAL MATCH then contributes one all-null group the assembler drops.
pub fn recipe_by_id(r_id: &str) -> Query {
    Query::new(
        "MATCH (r:Recipe {r_id: $id})\n\
         OPTIONAL MATCH (r)-[:HAS]->(ic:IngredientContainer)-[:HAS]->(bi:BasicIngredient)\n\
         WITH r, ic,\n\
              collect({bi_id: bi.bi_id, name: bi.name, amount: bi.amount}) AS ingredients\n\
         WITH r, collect({name: ic.name, ingredients: ingredients}) AS containers\n\
         OPTIONAL MATCH (r)-[:HAS]->(sc:InstructionContainer)-[:HAS]->(st:Instruction)\n\
         WITH r, containers, sc,\n\
              collect({order_no: st.order_no, step: st.step}) AS steps\n\
         WITH r, containers, collect({name: sc.name, steps: steps}) AS sections\n\
         OPTIONAL MATCH (r)-[:TAGGED]->(t:RecipeTag)\n\
         RETURN r.r_id, r.name, r.description, r.is_visible, r.image_url,\n\
                containers, sections,\n\
                collect({tag_id: t.tag_id, name: t.name}) AS tags",
    )
    .bind("id", r_id)
}

/// Point lookup of a user. Columns: name, profile, settings.
pub fn user_by_id(u_id: &str) -> Query {
    Query::new("MATCH (u:User {u_id: $id}) RETURN u.name, u.profile, u.settings").bind("id", u_id)
}

/// Recipes a user owns, preview projection only.
/// Columns: r_id, name, description, image_url, owner_id.
pub fn library_of(u_id: &str) -> Query {
    Query::new(
        "MATCH (u:User {u_id: $id})-[:OWN]->(r:Recipe)\n\
         RETURN r.r_id, r.name, r.description, r.image_url, u.u_id",
    )
    .bind("id", u_id)
}

/// Recipes a user bookmarked, preview projection with the real owner.
pub fn bookmarks_of(u_id: &str) -> Query {
    Query::new(
        "MATCH (u:User {u_id: $id})-[:BOOKMARK]->(r:Recipe)<-[:OWN]-(o:User)\n\
         RETURN r.r_id, r.name, r.description, r.image_url, o.u_id",
    )
    .bind("id", u_id)
}

/// A user's collections, one row per collection with preview members nested.
pub fn collections_of(u_id: &str) -> Query {
    Query::new(
        "MATCH (u:User {u_id: $id})-[:OWN]->(c:Collection)\n\
         OPTIONAL MATCH (c)-[:HAS]->(r:Recipe)<-[:OWN]-(o:User)\n\
         RETURN c.name,\n\
                collect({r_id: r.r_id, name: r.name, description: r.description,\n\
                         image_url: r.image_url, owner_id: o.u_id}) AS members",
    )
    .bind("id", u_id)
}

// ============================================================================
// Writes
// ============================================================================

pub fn create_user(u_id: &str, new: &NewUser) -> Query {
    Query::new(
        "CREATE (:User {u_id: $id, name: $name, profile: $profile, settings: $settings})",
    )
    .bind("id", u_id)
    .bind("name", new.name.as_str())
    .bind("profile", new.profile.as_str())
    .bind("settings", new.settings.as_str())
}

/// Write a fully-prepared recipe (ids minted, step order assigned) under its
/// owner. Nested structure goes through FOREACH over bound list parameters;
/// when the owner MATCH binds nothing, nothing is created and no row comes
/// back.
pub fn create_recipe(owner_id: &str, recipe: &Recipe) -> Query {
    Query::new(
        "MATCH (u:User {u_id: $owner})\n\
         CREATE (u)-[:OWN]->(r:Recipe {r_id: $id, name: $name, description: $description,\n\
                                       is_visible: $is_visible, image_url: $image_url})\n\
         FOREACH (c IN $ingredients |\n\
           CREATE (r)-[:HAS]->(ic:IngredientContainer {name: c.name})\n\
           FOREACH (i IN c.ingredients |\n\
             CREATE (ic)-[:HAS]->(:BasicIngredient {bi_id: i.bi_id, name: i.name, amount: i.amount})))\n\
         FOREACH (s IN $instructions |\n\
           CREATE (r)-[:HAS]->(sc:InstructionContainer {name: s.name})\n\
           FOREACH (st IN s.steps |\n\
             CREATE (sc)-[:HAS]->(:Instruction {order_no: st.order_no, step: st.step})))\n\
         FOREACH (t IN $tags |\n\
           MERGE (tag:RecipeTag {tag_id: t.tag_id})\n\
           SET tag.name = t.name\n\
           CREATE (r)-[:TAGGED]->(tag))\n\
         RETURN r.r_id",
    )
    .bind("owner", owner_id)
    .bind("id", recipe.id.as_str())
    .bind("name", recipe.name.as_str())
    .bind("description", recipe.description.as_str())
    .bind("is_visible", recipe.is_visible)
    .bind("image_url", recipe.image_url.as_str())
    .bind("ingredients", ingredient_params(recipe))
    .bind("instructions", instruction_params(recipe))
    .bind("tags", tag_params(recipe))
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn ingredient_params(recipe: &Recipe) -> Value {
    Value::List(
        recipe
            .ingredients
            .iter()
            .map(|container| {
                let items = container
                    .ingredients
                    .iter()
                    .map(|i| {
                        map(vec![
                            ("bi_id", i.id.to_string().into()),
                            ("name", i.name.as_str().into()),
                            ("amount", i.amount.to_string().into()),
                        ])
                    })
                    .collect();
                map(vec![
                    ("name", container.name.as_str().into()),
                    ("ingredients", Value::List(items)),
                ])
            })
            .collect(),
    )
}

fn instruction_params(recipe: &Recipe) -> Value {
    Value::List(
        recipe
            .instructions
            .iter()
            .map(|container| {
                let steps = container
                    .steps
                    .iter()
                    .map(|s| {
                        map(vec![
                            ("order_no", s.order_no.into()),
                            ("step", s.step.as_str().into()),
                        ])
                    })
                    .collect();
                map(vec![
                    ("name", container.name.as_str().into()),
                    ("steps", Value::List(steps)),
                ])
            })
            .collect(),
    )
}

fn tag_params(recipe: &Recipe) -> Value {
    Value::List(
        recipe
            .tags
            .iter()
            .map(|t| {
                map(vec![
                    ("tag_id", t.id.as_str().into()),
                    ("name", t.name.as_str().into()),
                ])
            })
            .collect(),
    )
}
