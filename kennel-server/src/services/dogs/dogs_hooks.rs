use anyhow::Result;
use async_trait::async_trait;
use kennel_core::hooks::{HookContext, KennelBeforeHook};
use serde_json::Value;

use crate::services::KennelParams;

use super::dogs_schema;

/// Rejects a create/update whose payload is not a valid Dog and replaces
/// the payload with its canonical form.
pub struct ValidateDogPayload;

#[async_trait]
impl KennelBeforeHook<Value, KennelParams> for ValidateDogPayload {
    async fn run(&self, ctx: &mut HookContext<Value, KennelParams>) -> Result<()> {
        let data = ctx.data.as_ref().unwrap_or(&Value::Null);
        let dog = dogs_schema::parse_dog(data)?;

        ctx.data = Some(serde_json::to_value(dog)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kennel_core::errors::KennelError;
    use kennel_core::{KennelConfig, ServiceMethodKind};
    use serde_json::json;

    use super::*;

    fn ctx(data: Option<Value>) -> HookContext<Value, KennelParams> {
        let mut ctx = HookContext::new(
            "dog",
            ServiceMethodKind::Create,
            KennelParams::default(),
            KennelConfig::new().snapshot(),
        );
        ctx.data = data;
        ctx
    }

    #[tokio::test]
    async fn replaces_payload_with_canonical_dog() {
        let mut ctx = ctx(Some(json!({"name": "Odie", "pk": 100, "kind": "terrier", "age": 3})));

        ValidateDogPayload.run(&mut ctx).await.unwrap();

        assert_eq!(ctx.data, Some(json!({"name": "Odie", "pk": 100, "kind": "terrier"})));
    }

    #[tokio::test]
    async fn missing_payload_is_a_body_error() {
        let mut ctx = ctx(None);

        let err = ValidateDogPayload.run(&mut ctx).await.unwrap_err();

        assert_eq!(KennelError::from_anyhow(&err).unwrap().loc, "body");
    }
}
