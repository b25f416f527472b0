use anyhow::Result;
use kennel_core::errors::KennelError;

use crate::models::DogKind;
use crate::services::KennelParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DogParams {
    pub kind: Option<DogKind>,
}

/// `?kind=` must name a known breed when present; an empty value is not
/// treated as absent.
impl TryFrom<&KennelParams> for DogParams {
    type Error = anyhow::Error;

    fn try_from(params: &KennelParams) -> Result<Self> {
        let kind = match params.query_param("kind") {
            None => None,
            Some(raw) => Some(
                raw.parse::<DogKind>()
                    .map_err(|e| KennelError::validation("kind", e.to_string()).into_anyhow())?,
            ),
        };

        Ok(Self { kind })
    }
}
