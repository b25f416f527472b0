use kennel_core::{ServiceCapabilities, ServiceMethodKind};

/// The post log is append-only: `POST /post` and nothing else. Whatever
/// body the client sends is not read.
pub fn append_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create]).ignoring_body()
}
