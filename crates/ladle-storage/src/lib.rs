//! Ladle storage layer: the domain repository over a graph engine.
//!
//! ```text
//!   caller ──► RecipeStore ──► cypher::…        (build parameterized query)
//!                  │
//!                  ▼
//!          GraphPool::acquire ──► GraphConnection::run ──► rows
//!                  │
//!                  ▼
//!              assemble::…                      (nested domain value)
//! ```
//!
//! The store holds no shared mutable state; each operation is one bounded
//! acquire → execute → assemble cycle and the connection is released on
//! every exit path. "No matching data" resolves to `None` or an empty list —
//! only invalid identifiers, integrity violations and engine failures
//! surface as [`StoreError`].

pub mod connection;


use chrono::{Duration, Utc};
use ladle_model::{
    BasicIngredient, Collection, IngredientContainer, IngredientId, Instruction,
    InstructionContainer, NewRecipe, NewUser, Recipe, RecipePreview, User,
};
use ladle_query::{assemble, cypher, Query, Row};
use thiserror::Error;
use uuid::Uuid;

pub use connection::{GraphConfig, GraphConnection, GraphError, GraphPool};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    /// A caller-supplied id failed codec validation. Not retryable.
    #[error("invalid identifier: {0}")]
    BadIdentifier(#[from] ladle_model::IdError),
    /// The stored data or the engine's rows broke a read invariant; points
    /// at a write-path defect, not at this request.
    #[error("data integrity violation: {0}")]
    Integrity(#[from] assemble::AssembleError),
    /// No such user to own the new recipe.
    #[error("unknown user '{0}'")]
    UnknownUser(String),
    /// The engine or the connection failed. Retry policy is the caller's.
    #[error("graph storage unavailable: {0}")]
    Unavailable(#[from] GraphError),
}

// ============================================================================
// Repository
// ============================================================================

/// Typed read/write access to the recipe graph.
pub struct RecipeStore<P> {
    pool: P,
}

impl<P: GraphPool> RecipeStore<P> {
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Fetch one recipe with its full nested breakdown. `Ok(None)` when no
    /// recipe has this id.
    pub async fn recipe(&self, r_id: &str) -> Result<Option<Recipe>, StoreError> {
        let rows = self.run("recipe", cypher::recipe_by_id(r_id)).await?;
        Ok(assemble::recipe(&rows)?)
    }

    /// Point lookup of a user. `Ok(None)` when absent.
    pub async fn user(&self, u_id: &str) -> Result<Option<User>, StoreError> {
        let rows = self.run("user", cypher::user_by_id(u_id)).await?;
        Ok(assemble::user(u_id, &rows)?)
    }

    /// Previews of the recipes a user owns. A user who owns nothing (or an
    /// unknown user) yields an empty list, never an error.
    pub async fn library(&self, u_id: &str) -> Result<Vec<RecipePreview>, StoreError> {
        let rows = self.run("library", cypher::library_of(u_id)).await?;
        Ok(assemble::previews(&rows)?)
    }

    /// Previews of the recipes a user bookmarked.
    pub async fn bookmarks(&self, u_id: &str) -> Result<Vec<RecipePreview>, StoreError> {
        let rows = self.run("bookmarks", cypher::bookmarks_of(u_id)).await?;
        Ok(assemble::previews(&rows)?)
    }

    /// A user's collections with their member previews.
    pub async fn collections(&self, u_id: &str) -> Result<Vec<Collection>, StoreError> {
        let rows = self.run("collections", cypher::collections_of(u_id)).await?;
        Ok(assemble::collections(&rows)?)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Create a user; the store mints the id.
    pub async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        self.run("create_user", cypher::create_user(&id, &new))
            .await?;
        Ok(User {
            id,
            name: new.name,
            profile: new.profile,
            settings: new.settings,
        })
    }

    /// Create a recipe under an owner. Ingredient ids are minted (or, when
    /// caller-supplied, validated) before anything touches the engine.
    pub async fn create_recipe(
        &self,
        owner_id: &str,
        new: NewRecipe,
    ) -> Result<Recipe, StoreError> {
        let recipe = prepare_recipe(new)?;
        let rows = self
            .run("create_recipe", cypher::create_recipe(owner_id, &recipe))
            .await?;
        // The owner MATCH bound nothing: the CREATE wrote nothing.
        if rows.is_empty() {
            return Err(StoreError::UnknownUser(owner_id.to_string()));
        }
        Ok(recipe)
    }

    // ------------------------------------------------------------------

    async fn run(&self, op: &'static str, query: Query) -> Result<Vec<Row>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        tracing::debug!(operation = op, "executing graph query");
        let rows = conn.run(&query).await.map_err(|err| {
            tracing::warn!(operation = op, error = %err, "graph query failed");
            err
        })?;
        tracing::debug!(operation = op, rows = rows.len(), "graph query returned");
        Ok(rows)
    }
}

/// Mint ids and assign step order for a recipe about to be written.
fn prepare_recipe(new: NewRecipe) -> Result<Recipe, StoreError> {
    let r_id = Uuid::new_v4().simple().to_string();
    // Owner code for minted ingredient ids: the recipe's short code.
    let code: String = r_id.chars().take(8).collect();
    let minted_at = Utc::now();
    let mut minted = 0i64;

    let mut ingredients = Vec::with_capacity(new.ingredients.len());
    for container in new.ingredients {
        let mut leaves = Vec::with_capacity(container.ingredients.len());
        for item in container.ingredients {
            let id = match item.id {
                Some(raw) => raw.parse::<IngredientId>()?,
                None => {
                    // Stamp batch items a millisecond apart so the
                    // time-derived suffix stays unique within the recipe.
                    let at = minted_at + Duration::milliseconds(minted);
                    minted += 1;
                    IngredientId::mint("bi", &code, at)?
                }
            };
            leaves.push(BasicIngredient {
                id,
                name: item.name,
                amount: item.amount,
            });
        }
        ingredients.push(IngredientContainer {
            name: container.name,
            ingredients: leaves,
        });
    }

    let instructions = new
        .instructions
        .into_iter()
        .map(|container| InstructionContainer {
            name: container.name,
            steps: container
                .steps
                .into_iter()
                .enumerate()
                .map(|(i, step)| Instruction {
                    order_no: i as i64 + 1,
                    step,
                })
                .collect(),
        })
        .collect();

    Ok(Recipe {
        id: r_id,
        name: new.name,
        description: new.description,
        is_visible: new.is_visible,
        image_url: new.image_url.unwrap_or_default(),
        ingredients,
        instructions,
        tags: new.tags,
    })
}
