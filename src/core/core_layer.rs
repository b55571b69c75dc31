// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "errors.rs"]
pub mod errors;

#[path = "store/config_store.rs"]
pub mod store;

#[path = "leveling/leveling_service.rs"]
pub mod leveling;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "replies/mod.rs"]
pub mod replies;

#[path = "routing/message_router.rs"]
pub mod routing;

#[path = "onboarding/onboarding_service.rs"]
pub mod onboarding;

#[path = "fun/fun_service.rs"]
pub mod fun;

#[path = "ai/mod.rs"]
pub mod ai;
