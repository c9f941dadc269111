//! Ladle domain model.
//!
//! Data-only definitions for the recipe graph: the entities the repository
//! reads and writes, the preview projection used by listings, and the
//! composite ingredient identifier codec. No I/O and no engine types cross
//! this crate; the API-exposition layer maps these records to its own
//! schema.

pub mod amount;
pub mod ingredient_id;

pub use amount::Amount;
pub use ingredient_id::{IdError, IngredientId};

use serde::{Deserialize, Serialize};

// ============================================================================
// Users
// ============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub profile: String,
    /// Opaque settings blob, owned by the client.
    pub settings: String,
}

// ============================================================================
// Recipes
// ============================================================================

/// A recipe with its full ingredient and instruction breakdown.
///
/// Owned by exactly one user via the graph's OWN edge; the owner is not
/// duplicated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_visible: bool,
    /// Empty when the recipe has no image.
    pub image_url: String,
    pub ingredients: Vec<IngredientContainer>,
    pub instructions: Vec<InstructionContainer>,
    pub tags: Vec<RecipeTag>,
}

/// A named grouping of basic ingredients ("dough", "sauce").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientContainer {
    pub name: String,
    pub ingredients: Vec<BasicIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicIngredient {
    pub id: IngredientId,
    pub name: String,
    pub amount: Amount,
}

/// A named run of steps ("preparation", "baking"). Steps are held sorted
/// by `order_no`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionContainer {
    pub name: String,
    pub steps: Vec<Instruction>,
}

/// One step. `order_no` is unique within its container and defines display
/// order, not insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub order_no: i64,
    pub step: String,
}

// ============================================================================
// Tags and archetypes
// ============================================================================

/// A category tag applied to zero or more recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTag {
    pub id: String,
    pub name: String,
}

/// A reusable recipe template naming its expected components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeArchetype {
    pub id: String,
    pub name: String,
    pub components: Vec<String>,
}

// ============================================================================
// Collections and previews
// ============================================================================

/// A user-curated named grouping of recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub recipes: Vec<RecipePreview>,
}

/// Reduced read-only view of a recipe for listing contexts. Never persisted;
/// synthesized per query by the row assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePreview {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub owner_id: String,
}

// ============================================================================
// Write inputs
// ============================================================================

/// Input for creating a user. The store mints the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub profile: String,
    pub settings: String,
}

/// Input for creating a recipe under an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub is_visible: bool,
    pub image_url: Option<String>,
    pub ingredients: Vec<NewIngredientContainer>,
    pub instructions: Vec<NewInstructionContainer>,
    pub tags: Vec<RecipeTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIngredientContainer {
    pub name: String,
    pub ingredients: Vec<NewIngredient>,
}

/// Ingredient input. A pre-encoded id (e.g. when copying a recipe) must
/// decode; when absent the store mints one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub id: Option<String>,
    pub name: String,
    pub amount: Amount,
}

/// Steps in display order; the store assigns `order_no` from position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstructionContainer {
    pub name: String,
    pub steps: Vec<String>,
}
