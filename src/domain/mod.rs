// ドメイン層 - 衝突関係と分割の中核

pub mod oracle;
pub mod partition;
pub mod relation;
pub mod sample;
pub mod search;
pub mod universe;
pub mod validation;

pub use oracle::{conflicts, ConflictMatrix};
pub use partition::Partition;
pub use relation::{scalar_item, ConflictRelation};
pub use universe::linearize;
pub use validation::validate_known_items;
