pub mod onboarding_session;
pub mod pincode_lookup;
pub mod vendor_basics;
