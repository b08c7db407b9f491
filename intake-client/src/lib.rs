//! Side-effecting half of project intake: datastore adapters, identity lookup,
//! webhook relay, persisted settings and the two-phase submission coordinator.

pub mod coordinator;
pub mod error;
pub mod identity;
pub mod settings;
pub mod store;
pub mod supabase;
pub mod validation;
pub mod webhook;

pub use coordinator::{
    OutcomeSummary, SubmissionCoordinator, SubmissionState, SubmitOutcome, SubmitRequest,
    WebhookOutcome,
};
pub use error::{
    IdentityError, PersistenceError, RelayError, StoreError, SubmitError, ValidationError,
};
pub use identity::{resolve_user, IdentityProvider, SignedInUser, StaticIdentity, SupabaseIdentity};
pub use settings::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, WebhookHint, WebhookUrlSetting,
    WEBHOOK_URL_KEY,
};
pub use store::{ProjectStore, SqliteProjectStore, SupabaseProjectStore};
pub use supabase::SupabaseConfig;
pub use validation::validate_webhook_url;
pub use webhook::{WebhookClient, WebhookDelivery};
