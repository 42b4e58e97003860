pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::{RecordStore, StoreHandle};

use crate::lead::LeadRecord;
use crate::message::ContactMessage;

/// Store of trial signups and demo requests.
pub type LeadStore = StoreHandle<LeadRecord>;

/// Store of contact form submissions.
pub type MessageStore = StoreHandle<ContactMessage>;
