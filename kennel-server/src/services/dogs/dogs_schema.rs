use anyhow::Result;
use serde_json::Value;

use crate::models::Dog;

/// A full Dog record: `name` (non-empty), `pk`, `kind`. Unknown fields are
/// ignored.
pub fn parse_dog(data: &Value) -> Result<Dog> {
    kennel_schema::validate::<Dog>(data)
}
