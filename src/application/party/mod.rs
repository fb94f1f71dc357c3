mod create_party;
mod disband_party;
mod get_my_party;
mod join_party;
mod kick_member;
mod leave_party;
mod lookup_party;
mod regenerate_invite;
mod transfer_ownership;


pub use create_party::*;
pub use disband_party::*;
pub use get_my_party::*;
pub use join_party::*;
pub use kick_member::*;
pub use leave_party::*;
pub use lookup_party::*;
pub use regenerate_invite::*;
pub use transfer_ownership::*;
