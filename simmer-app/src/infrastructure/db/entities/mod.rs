pub mod category;
pub mod ingredient;
pub mod instruction;
pub mod rating;
pub mod recipe;
pub mod user;

pub use category::Entity as Category;
pub use ingredient::Entity as Ingredient;
pub use instruction::Entity as Instruction;
pub use rating::Entity as Rating;
pub use recipe::Entity as Recipe;
pub use user::Entity as User;
