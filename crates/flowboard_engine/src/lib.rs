pub mod api;
pub mod assets;
pub mod clock;
pub mod config;
pub mod id;
pub mod lead;
pub mod message;
pub mod notifications;
pub mod store;
pub mod timestamp;

pub use api::ApiService;
pub use assets::StaticAssetService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, load_config, load_config_with_env};
pub use id::{RecordId, RecordIdGenerator};
pub use lead::{DemoLead, LeadRecord, LeadStatus, Plan, TrialLead};
pub use message::{ContactMessage, ContactStatus};
pub use store::{InMemoryStore, LeadStore, MessageStore, RecordStore, StoreHandle};
