pub type KennelParams = kennel_axum::params::RestParams;
