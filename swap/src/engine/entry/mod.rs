pub mod collection;
pub mod matches;
pub mod member;

pub use collection::{Collection, ItemId, MAX_ITEM_ID};
pub use matches::{GiveMatch, PerfectMatch, ReceiveMatch};
pub use member::Member;
